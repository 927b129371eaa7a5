//! Column sorting for the achievement table

use super::AchievementRecord;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Date,
    Name,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "time" => Ok(Self::Time),
            other => Err(format!("unknown column '{}' (expected date, name or time)", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown direction '{}' (expected asc or desc)", other)),
        }
    }
}

fn compare_dates(a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.date.cmp(&b.date),
    }
}

fn compare(column: SortColumn, a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    match column {
        SortColumn::Date => compare_dates(a, b),
        SortColumn::Name => a.name.cmp(&b.name),
        // HH:MM:SS is zero padded, so text order is time order
        SortColumn::Time => a.time.cmp(&b.time),
    }
}

/// Sort `records` in place
///
/// Unparseable dates always sort after parseable ones, in either direction.
pub fn sort_records(records: &mut [AchievementRecord], column: SortColumn, direction: SortDirection) {
    records.sort_by(|a, b| {
        if column == SortColumn::Date {
            match (a.parsed_date().is_some(), b.parsed_date().is_some()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        let ordering = compare(column, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, name: &str, time: &str) -> AchievementRecord {
        AchievementRecord {
            date: date.to_string(),
            name: name.to_string(),
            time: time.to_string(),
        }
    }

    fn names(records: &[AchievementRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_desc_puts_legacy_last() {
        //! Newest first, with free-form dates at the end
        let mut records = vec![
            record("yesterday", "legacy", "00:00:01"),
            record("2026-01-01T00:00:00.000Z", "old", "00:00:02"),
            record("2026-05-01T00:00:00.000Z", "new", "00:00:03"),
        ];
        sort_records(&mut records, SortColumn::Date, SortDirection::Desc);
        assert_eq!(names(&records), vec!["new", "old", "legacy"]);

        sort_records(&mut records, SortColumn::Date, SortDirection::Asc);
        assert_eq!(names(&records), vec!["old", "new", "legacy"]);
    }

    #[test]
    fn test_sort_by_name_and_time() {
        //! Name and time columns sort lexically
        let mut records = vec![
            record("a", "Scotch", "00:10:00"),
            record("b", "Italian", "00:02:30"),
            record("c", "Ruy Lopez", "01:00:00"),
        ];
        sort_records(&mut records, SortColumn::Name, SortDirection::Asc);
        assert_eq!(names(&records), vec!["Italian", "Ruy Lopez", "Scotch"]);

        sort_records(&mut records, SortColumn::Time, SortDirection::Desc);
        assert_eq!(names(&records), vec!["Ruy Lopez", "Scotch", "Italian"]);
    }

    #[test]
    fn test_parse_column_and_direction() {
        assert_eq!("Time".parse::<SortColumn>(), Ok(SortColumn::Time));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("speed".parse::<SortColumn>().is_err());
    }
}
