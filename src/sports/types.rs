use serde::{Deserialize, Serialize};

/// Status codes API-Sports uses for a match that is over and whose score is final.
pub const FINISHED_STATUSES: [&str; 3] = ["FT", "AET", "PEN"];

// ---------------------------------------------------------------------------
// Fixtures endpoint (API-Sports wire format)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFixturesResponse {
    #[serde(default)]
    pub results: Option<u32>,
    #[serde(default)]
    pub response: Vec<ApiFixtureItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFixtureItem {
    pub fixture: ApiFixture,
    pub teams: ApiTeams,
    #[serde(default)]
    pub goals: ApiGoals,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFixture {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    pub status: ApiFixtureStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiFixtureStatus {
    #[serde(default)]
    pub long: Option<String>,
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTeam {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiGoals {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

// ---------------------------------------------------------------------------
// Fixture: the flattened view settlement works with
// ---------------------------------------------------------------------------

/// One match as seen at lookup time. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: i64,
    pub status_short: String,
    pub goals_home: Option<u32>,
    pub goals_away: Option<u32>,
    pub home_name: String,
    pub away_name: String,
}

impl Fixture {
    pub fn is_finished(&self) -> bool {
        FINISHED_STATUSES.contains(&self.status_short.as_str())
    }
}

impl From<ApiFixtureItem> for Fixture {
    fn from(item: ApiFixtureItem) -> Self {
        Self {
            id: item.fixture.id,
            status_short: item.fixture.status.short,
            goals_home: item.goals.home,
            goals_away: item.goals.away,
            home_name: item.teams.home.name,
            away_name: item.teams.away.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "get": "fixtures",
        "parameters": { "date": "2024-03-02" },
        "errors": [],
        "results": 2,
        "response": [
            {
                "fixture": {
                    "id": 1035338,
                    "date": "2024-03-02T15:00:00+00:00",
                    "status": { "long": "Match Finished", "short": "FT", "elapsed": 90 }
                },
                "league": { "id": 39, "name": "Premier League" },
                "teams": {
                    "home": { "id": 33, "name": "Manchester United", "winner": true },
                    "away": { "id": 40, "name": "Liverpool", "winner": false }
                },
                "goals": { "home": 2, "away": 1 }
            },
            {
                "fixture": {
                    "id": 1035339,
                    "status": { "long": "Not Started", "short": "NS", "elapsed": null }
                },
                "teams": {
                    "home": { "id": 50, "name": "Manchester City" },
                    "away": { "id": 42, "name": "Arsenal" }
                },
                "goals": { "home": null, "away": null }
            }
        ]
    }"#;

    #[test]
    fn test_parse_fixtures_response() {
        let parsed: ApiFixturesResponse = serde_json::from_str(SAMPLE).unwrap();
        let fixtures: Vec<Fixture> = parsed.response.into_iter().map(Fixture::from).collect();

        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].id, 1035338);
        assert_eq!(fixtures[0].home_name, "Manchester United");
        assert_eq!(fixtures[0].goals_home, Some(2));
        assert_eq!(fixtures[0].goals_away, Some(1));
        assert!(fixtures[0].is_finished());

        assert_eq!(fixtures[1].status_short, "NS");
        assert_eq!(fixtures[1].goals_home, None);
        assert!(!fixtures[1].is_finished());
    }

    #[test]
    fn test_missing_goals_block_defaults_to_unknown() {
        let json = r#"{
            "fixture": { "id": 7, "status": { "short": "PST" } },
            "teams": { "home": { "name": "A" }, "away": { "name": "B" } }
        }"#;
        let item: ApiFixtureItem = serde_json::from_str(json).unwrap();
        let fixture = Fixture::from(item);
        assert_eq!(fixture.goals_home, None);
        assert_eq!(fixture.goals_away, None);
    }

    #[test]
    fn test_finished_statuses() {
        let mut fixture = Fixture {
            id: 1,
            status_short: String::new(),
            goals_home: Some(0),
            goals_away: Some(0),
            home_name: "A".into(),
            away_name: "B".into(),
        };
        for code in ["FT", "AET", "PEN"] {
            fixture.status_short = code.into();
            assert!(fixture.is_finished(), "{code} should count as finished");
        }
        for code in ["NS", "1H", "HT", "2H", "ET", "P", "PST", "CANC", "ft"] {
            fixture.status_short = code.into();
            assert!(!fixture.is_finished(), "{code} should not count as finished");
        }
    }
}
