use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::http_client;
use crate::viz::Entry;

const API_KEY_HEADER: &str = "x-apisports-key";

/// A result plus the soft-failure notes gathered while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fetched<T> {
    pub value: T,
    pub notes: Vec<String>,
}

impl<T> Fetched<T> {
    fn new(value: T, notes: Vec<String>) -> Self {
        Self { value, notes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
    pub country: Option<String>,
}

/// Outcome of one page request, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Body(String),
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct ApiFootball {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl ApiFootball {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs,
        }
    }

    pub fn search_team(&self, team_name: &str) -> Result<Fetched<Vec<TeamRecord>>> {
        let url = format!("{}/teams", self.base_url);
        match self.get(&url, &[("search", team_name.to_string())])? {
            PageResponse::Status(code) => {
                Ok(Fetched::new(Vec::new(), vec![format!("API Error: {code}")]))
            }
            PageResponse::Body(body) => {
                let page = parse_teams_json(&body)?;
                Ok(Fetched::new(page.items, api_error_notes(&page.errors)))
            }
        }
    }

    pub fn fetch_players_by_goals(
        &self,
        team_id: u32,
        season: &str,
        limit: usize,
    ) -> Result<Fetched<Vec<Entry>>> {
        let url = format!("{}/players", self.base_url);
        collect_player_pages(
            |page| {
                self.get(
                    &url,
                    &[
                        ("team", team_id.to_string()),
                        ("season", season.to_string()),
                        ("page", page.to_string()),
                    ],
                )
            },
            limit,
        )
    }

    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<PageResponse> {
        let client = http_client(self.timeout_secs)?;
        let resp = client
            .get(url)
            .query(query)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .context("api-football request failed")?;
        let status = resp.status();
        if !status.is_success() {
            return Ok(PageResponse::Status(status.as_u16()));
        }
        let body = resp.text().context("failed reading api-football body")?;
        Ok(PageResponse::Body(body))
    }
}

/// Walks pages 1, 2, ... until one comes back empty or with a non-success
/// status, summing goals and appearances per player across competitions.
/// Keeps the first `limit` players who both played and scored.
pub fn collect_player_pages(
    mut fetch_page: impl FnMut(u32) -> Result<PageResponse>,
    limit: usize,
) -> Result<Fetched<Vec<Entry>>> {
    let mut notes = Vec::new();
    let mut entries = Vec::new();
    let mut page = 1;

    loop {
        let body = match fetch_page(page)? {
            PageResponse::Status(code) => {
                notes.push(format!("API Error: {code}"));
                break;
            }
            PageResponse::Body(body) => body,
        };
        let players = parse_players_page_json(&body)
            .with_context(|| format!("players page {page}"))?;
        notes.extend(api_error_notes(&players.errors));
        let players = players.items;
        if players.is_empty() {
            if page == 1 {
                notes.push("No players returned from API.".to_string());
            }
            break;
        }
        entries.extend(players.iter().filter_map(player_goal_entry));
        page += 1;
    }

    if entries.is_empty() {
        notes.push("No players with goals found.".to_string());
    }
    entries.truncate(limit);
    Ok(Fetched::new(entries, notes))
}

/// One decoded response envelope. API-Football reports request problems
/// (bad key, exhausted quota) as a 200 with an `errors` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPage<T> {
    pub items: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> ApiPage<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
        }
    }
}

pub fn parse_teams_json(raw: &str) -> Result<ApiPage<TeamRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ApiPage::empty());
    }
    let envelope: Envelope<TeamItem> =
        serde_json::from_str(trimmed).context("invalid teams json")?;
    Ok(ApiPage {
        items: envelope
            .response
            .into_iter()
            .map(|item| TeamRecord {
                id: item.team.id,
                name: item.team.name,
                country: item.team.country,
            })
            .collect(),
        errors: flatten_errors(&envelope.errors),
    })
}

pub fn parse_players_page_json(raw: &str) -> Result<ApiPage<PlayerItem>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ApiPage::empty());
    }
    let envelope: Envelope<PlayerItem> =
        serde_json::from_str(trimmed).context("invalid players json")?;
    let errors = flatten_errors(&envelope.errors);
    Ok(ApiPage {
        items: envelope.response,
        errors,
    })
}

fn flatten_errors(raw: &Value) -> Vec<String> {
    match raw {
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| match val {
                Value::String(msg) => format!("{key}: {msg}"),
                other => format!("{key}: {other}"),
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(|val| match val {
                Value::String(msg) => msg.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(msg) if !msg.trim().is_empty() => vec![msg.clone()],
        _ => Vec::new(),
    }
}

fn api_error_notes(errors: &[String]) -> Vec<String> {
    errors.iter().map(|e| format!("API Error: {e}")).collect()
}

pub fn player_goal_entry(item: &PlayerItem) -> Option<Entry> {
    let goals: u32 = item
        .statistics
        .iter()
        .map(|s| s.goals.total.unwrap_or(0))
        .sum();
    let appearances: u32 = item
        .statistics
        .iter()
        .map(|s| s.games.appearances.unwrap_or(0))
        .sum();
    if goals > 0 && appearances > 0 {
        Some(Entry::new(item.player.name.clone(), goals))
    } else {
        None
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    response: Vec<T>,
    #[serde(default)]
    errors: Value,
}

#[derive(Debug, Deserialize)]
struct TeamItem {
    team: TeamInfo,
}

#[derive(Debug, Deserialize)]
struct TeamInfo {
    id: u32,
    name: String,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerItem {
    pub player: PlayerInfo,
    #[serde(default)]
    pub statistics: Vec<CompetitionStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitionStats {
    #[serde(default)]
    pub games: GamesStats,
    #[serde(default)]
    pub goals: GoalsStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesStats {
    // Upstream spells it this way.
    #[serde(rename = "appearences", default)]
    pub appearances: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalsStats {
    #[serde(default)]
    pub total: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::{PageResponse, collect_player_pages};

    fn page_with(players: &[(&str, u32, u32)]) -> PageResponse {
        let items: Vec<String> = players
            .iter()
            .map(|(name, apps, goals)| {
                format!(
                    r#"{{"player":{{"name":"{name}"}},"statistics":[{{"games":{{"appearences":{apps}}},"goals":{{"total":{goals}}}}}]}}"#
                )
            })
            .collect();
        PageResponse::Body(format!(r#"{{"response":[{}]}}"#, items.join(",")))
    }

    fn empty_page() -> PageResponse {
        PageResponse::Body(r#"{"response":[]}"#.to_string())
    }

    #[test]
    fn empty_first_page_yields_nothing() {
        let out = collect_player_pages(|_| Ok(empty_page()), 20).expect("collect");
        assert!(out.value.is_empty());
        assert_eq!(
            out.notes,
            vec![
                "No players returned from API.".to_string(),
                "No players with goals found.".to_string()
            ]
        );
    }

    #[test]
    fn walks_pages_until_empty() {
        let mut requested = Vec::new();
        let out = collect_player_pages(
            |page| {
                requested.push(page);
                Ok(match page {
                    1 => page_with(&[("A. One", 10, 4), ("B. Two", 3, 0)]),
                    2 => page_with(&[("C. Three", 0, 2), ("D. Four", 5, 1)]),
                    _ => empty_page(),
                })
            },
            20,
        )
        .expect("collect");
        assert_eq!(requested, vec![1, 2, 3]);
        let names: Vec<&str> = out.value.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A. One", "D. Four"]);
        assert!(out.notes.is_empty());
    }

    #[test]
    fn error_status_stops_but_keeps_earlier_pages() {
        let out = collect_player_pages(
            |page| {
                Ok(match page {
                    1 => page_with(&[("A. One", 10, 4)]),
                    _ => PageResponse::Status(429),
                })
            },
            20,
        )
        .expect("collect");
        assert_eq!(out.value.len(), 1);
        assert_eq!(out.notes, vec!["API Error: 429".to_string()]);
    }

    #[test]
    fn truncates_to_first_encountered_not_top_scorers() {
        let out = collect_player_pages(
            |page| {
                Ok(match page {
                    1 => page_with(&[("Low", 1, 1), ("Mid", 1, 5), ("High", 1, 30)]),
                    _ => empty_page(),
                })
            },
            2,
        )
        .expect("collect");
        let names: Vec<&str> = out.value.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Low", "Mid"]);
    }

    #[test]
    fn transport_error_propagates() {
        let res = collect_player_pages(|_| Err(anyhow::anyhow!("connection refused")), 20);
        assert!(res.is_err());
    }
}
