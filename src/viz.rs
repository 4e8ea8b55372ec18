use serde::Deserialize;

pub const SIDE_PAD: u16 = 4;
pub const TOP_PAD: u16 = 2;
pub const BOTTOM_PAD: u16 = 2;
/// Vertical resolution of one cell, matching the eighth-block glyphs.
pub const SUBCELLS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub name: String,
    pub goals: u32,
}

impl Entry {
    pub fn new(name: impl Into<String>, goals: u32) -> Self {
        Self {
            name: name.into(),
            goals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub bar_width: u16,
    /// Eighth-cells per goal above the minimum.
    pub bar_height_scale: u32,
    pub min_value: u32,
    pub max_value: u32,
    pub start_x: u16,
}

impl Geometry {
    pub fn derive(width: u16, height: u16, entries: &[Entry]) -> Self {
        let min_value = entries.iter().map(|e| e.goals).min().unwrap_or(0);
        let max_value = entries.iter().map(|e| e.goals).max().unwrap_or(0);
        let count = u16::try_from(entries.len().max(1)).unwrap_or(u16::MAX);

        let bar_width = (width.saturating_sub(SIDE_PAD) / count).max(1);
        let value_range = (max_value - min_value).max(1);
        let plot_units = plot_rows(height).saturating_sub(1) as u32 * SUBCELLS;
        let bar_height_scale = (plot_units / value_range).max(1);

        Self {
            bar_width,
            bar_height_scale,
            min_value,
            max_value,
            start_x: SIDE_PAD / 2,
        }
    }

    /// Bar height in eighth-cells, before clipping. The minimum value still
    /// gets one full cell.
    pub fn bar_units(&self, value: u32) -> u32 {
        value
            .saturating_sub(self.min_value)
            .saturating_mul(self.bar_height_scale)
            .saturating_add(SUBCELLS)
    }

    pub fn bar_x(&self, idx: usize) -> u32 {
        let idx = u32::try_from(idx).unwrap_or(u32::MAX);
        idx.saturating_mul(self.bar_width as u32)
            .saturating_add(self.start_x as u32)
    }
}

/// Rows available to bars between the value-label band and the name band.
pub fn plot_rows(height: u16) -> u16 {
    height.saturating_sub(TOP_PAD + BOTTOM_PAD)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizState {
    width: u16,
    height: u16,
    entries: Vec<Entry>,
    geometry: Geometry,
}

impl VizState {
    pub fn initialize(width: u16, height: u16, entries: Vec<Entry>) -> Self {
        let geometry = Geometry::derive(width, height, &entries);
        Self {
            width,
            height,
            entries,
            geometry,
        }
    }

    pub fn update_dataset(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.geometry = Geometry::derive(self.width, self.height, &self.entries);
    }

    /// Returns true when the size changed and geometry was rebuilt.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.geometry = Geometry::derive(width, height, &self.entries);
        true
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Reordering leaves min/max alone, so geometry stays valid.
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }
}
