use super::model::LatestSnapshot;

/// One country on the case map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTile {
    pub code: String,
    pub name: String,
    pub total_cases: Option<f64>,
    /// `total_cases` scaled linearly onto `[0, 1]` across the snapshot.
    pub intensity: Option<f32>,
}

/// Colour-scale the latest total cases of each country, keyed by ISO code.
///
/// Tiles are ordered by code. Countries without a case count get no
/// intensity; if every count is equal they all get full intensity.
pub fn map_tiles(snapshot: &LatestSnapshot) -> Vec<MapTile> {
    let (min, max) = snapshot
        .rows
        .iter()
        .filter_map(|r| r.total_cases.filter(|v| v.is_finite()))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;

    let mut tiles: Vec<MapTile> = snapshot
        .rows
        .iter()
        .map(|r| {
            let intensity = r.total_cases.filter(|v| v.is_finite()).map(|v| {
                if span > 0.0 {
                    ((v - min) / span) as f32
                } else {
                    1.0
                }
            });
            MapTile {
                code: r.entity_code.clone(),
                name: r.entity_name.clone(),
                total_cases: r.total_cases,
                intensity,
            }
        })
        .collect();
    tiles.sort_by(|a, b| a.code.cmp(&b.code));
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{date, record};

    #[test]
    fn intensities_span_unit_interval() {
        let snap = LatestSnapshot {
            rows: vec![
                record("Kenya", "KEN", date(2022, 1, 1), Some(300.0)),
                record("India", "IND", date(2022, 1, 1), Some(1100.0)),
                record("Peru", "PER", date(2022, 1, 1), Some(100.0)),
                record("Chad", "TCD", date(2022, 1, 1), None),
            ],
        };
        let tiles = map_tiles(&snap);

        let codes: Vec<_> = tiles.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["IND", "KEN", "PER", "TCD"]);
        assert_eq!(tiles[0].intensity, Some(1.0));
        assert!((tiles[1].intensity.unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(tiles[2].intensity, Some(0.0));
        assert_eq!(tiles[3].intensity, None);
        assert!(tiles
            .iter()
            .filter_map(|t| t.intensity)
            .all(|i| (0.0..=1.0).contains(&i)));
    }

    #[test]
    fn equal_counts_get_full_intensity() {
        let snap = LatestSnapshot {
            rows: vec![
                record("Kenya", "KEN", date(2022, 1, 1), Some(5.0)),
                record("Peru", "PER", date(2022, 1, 1), Some(5.0)),
            ],
        };
        assert!(map_tiles(&snap).iter().all(|t| t.intensity == Some(1.0)));
    }

    #[test]
    fn empty_snapshot_has_no_tiles() {
        assert!(map_tiles(&LatestSnapshot::default()).is_empty());
    }
}
