use super::types::Fixture;
use super::{FixtureSource, SportsApiError};

/// Equality key for team names: lowercase with every whitespace char and `.` removed.
///
/// Deliberately crude. "Man Utd" and "Manchester United" do not match; there is
/// no alias table and no edit distance.
pub fn normalize_team_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// First fixture whose normalized home and away names both equal the inputs.
pub fn find_fixture<'a>(fixtures: &'a [Fixture], home: &str, away: &str) -> Option<&'a Fixture> {
    let home = normalize_team_name(home);
    let away = normalize_team_name(away);

    fixtures.iter().find(|f| {
        normalize_team_name(&f.home_name) == home && normalize_team_name(&f.away_name) == away
    })
}

/// Query the fixtures played on `date` and pick the one between `home` and `away`.
///
/// `Ok(None)` means nothing matched; transport and non-2xx failures are errors.
pub async fn lookup_fixture<S>(
    source: &S,
    home: &str,
    away: &str,
    date: &str,
) -> Result<Option<Fixture>, SportsApiError>
where
    S: FixtureSource + ?Sized,
{
    let fixtures = source.fixtures_on(date.trim()).await?;
    let found = find_fixture(&fixtures, home, away).cloned();

    tracing::debug!(
        home,
        away,
        date,
        candidates = fixtures.len(),
        fixture_id = ?found.as_ref().map(|f| f.id),
        "Fixture lookup"
    );

    Ok(found)
}
