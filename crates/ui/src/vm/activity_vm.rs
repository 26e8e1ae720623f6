use mantra_core::activity::DailyBucket;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapCellVm {
    pub level: u8,
    pub tooltip: String,
}

impl From<&DailyBucket> for HeatmapCellVm {
    fn from(bucket: &DailyBucket) -> Self {
        Self {
            level: intensity(bucket.sessions),
            tooltip: format!(
                "{}: {}",
                bucket.date.format("%Y-%m-%d"),
                count_label(bucket.sessions)
            ),
        }
    }
}

#[must_use]
pub fn map_heatmap_cells(buckets: &[DailyBucket]) -> Vec<HeatmapCellVm> {
    buckets.iter().map(HeatmapCellVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripDayVm {
    pub label: String,
    pub count_label: String,
}

impl From<&DailyBucket> for StripDayVm {
    fn from(bucket: &DailyBucket) -> Self {
        Self {
            label: bucket.date.format("%a").to_string(),
            count_label: count_label(bucket.sessions),
        }
    }
}

#[must_use]
pub fn map_strip_days(buckets: &[DailyBucket]) -> Vec<StripDayVm> {
    buckets.iter().map(StripDayVm::from).collect()
}

fn count_label(sessions: u32) -> String {
    match sessions {
        0 => "rest day".to_string(),
        1 => "1 session".to_string(),
        n => format!("{n} sessions"),
    }
}

// Shade buckets for the CSS `level-N` classes.
fn intensity(sessions: u32) -> u8 {
    match sessions {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=9 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bucket(day: u32, sessions: u32) -> DailyBucket {
        DailyBucket {
            date: NaiveDate::from_ymd_opt(2023, 11, day).unwrap(),
            sessions,
        }
    }

    #[test]
    fn intensity_levels_cover_the_whole_range() {
        assert_eq!(intensity(0), 0);
        assert_eq!(intensity(1), 1);
        assert_eq!(intensity(2), 1);
        assert_eq!(intensity(3), 2);
        assert_eq!(intensity(5), 2);
        assert_eq!(intensity(6), 3);
        assert_eq!(intensity(9), 3);
        assert_eq!(intensity(10), 4);
        assert_eq!(intensity(500), 4);
    }

    #[test]
    fn heatmap_cells_keep_order_and_carry_tooltips() {
        let cells = map_heatmap_cells(&[bucket(1, 0), bucket(2, 4)]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].level, 0);
        assert_eq!(cells[0].tooltip, "2023-11-01: rest day");
        assert_eq!(cells[1].level, 2);
        assert_eq!(cells[1].tooltip, "2023-11-02: 4 sessions");
    }

    #[test]
    fn strip_days_pluralize_counts() {
        let days = map_strip_days(&[bucket(13, 1), bucket(14, 0)]);
        assert_eq!(days[0].count_label, "1 session");
        assert_eq!(days[1].count_label, "rest day");
        // 2023-11-14 was a Tuesday.
        assert_eq!(days[1].label, "Tue");
    }
}
