//! Integration tests for the Vimshottari engine.
//!
//! Pure math: no ephemeris input is needed, anchors are given directly.

use astrova_dasha::dasha::{
    ChildCache, DashaOptions, JdRange, MAX_DASHA_DEPTH, VIMSHOTTARI_CYCLE, YearConvention,
    build_dasha_timeline, cycle_position, graha_years, nakshatra_lord,
};
use astrova_dasha::{Anchor, DashaError, DashaPeriod, Graha};
use astrova_time::{UtcTime, iso_to_jd, jd_to_iso};

const GREGORIAN_YEAR: f64 = 365.2425;

fn y2k() -> f64 {
    iso_to_jd("2000-01-01T00:00:00Z").unwrap()
}

fn assert_contiguous(parent: &DashaPeriod, children: &[DashaPeriod]) {
    assert_eq!(children.first().unwrap().start_jd, parent.start_jd);
    assert_eq!(children.last().unwrap().end_jd, parent.end_jd);
    for w in children.windows(2) {
        assert_eq!(w[0].end_jd, w[1].start_jd);
        assert!(w[0].end_jd > w[0].start_jd);
    }
}

#[test]
fn cycle_sum_invariant() {
    let total: u32 = VIMSHOTTARI_CYCLE.iter().map(|e| e.years as u32).sum();
    assert_eq!(total, 120);
}

#[test]
fn nakshatra_lords_repeat_three_times() {
    for idx in 0u8..27 {
        let lord = nakshatra_lord(idx).unwrap();
        assert_eq!(lord.graha, VIMSHOTTARI_CYCLE[idx as usize % 9].graha);
    }
    assert_eq!(
        nakshatra_lord(27).unwrap_err(),
        DashaError::InvalidNakshatraIndex(27)
    );
}

/// Scenario 1: Ashlesha, fresh Mahadasha at 2000-01-01.
#[test]
fn ashlesha_fresh_start() {
    let anchor = Anchor::new(8, 0.0, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let first = t.root_sequence()[0];

    assert_eq!(first.graha, Graha::Buddh);
    assert_eq!(first.start_jd, y2k());
    assert_eq!(jd_to_iso(first.start_jd).unwrap(), "2000-01-01T00:00:00Z");
    let years = first.duration_years(YearConvention::Gregorian);
    assert!((years - graha_years(Graha::Buddh) as f64).abs() < 1e-9);
}

/// Scenario 2: half elapsed leaves half the years, nominal start moves back.
#[test]
fn ashlesha_half_elapsed() {
    let anchor = Anchor::new(8, 0.5, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let first = t.root_sequence()[0];

    assert_eq!(first.start_jd, y2k());
    assert!((first.duration_days() - 8.5 * GREGORIAN_YEAR).abs() < 1e-6);
    assert!((t.nominal_start_jd() - (y2k() - 8.5 * GREGORIAN_YEAR)).abs() < 1e-6);
}

/// Scenario 3: every Mahadasha splits into 9 self-starting children.
#[test]
fn every_mahadasha_has_nine_self_starting_children() {
    let anchor = Anchor::new(13, 0.37, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    for maha in t.root_sequence() {
        let children = t.children_of(maha);
        assert_eq!(children.len(), 9);
        assert_eq!(children[0].graha, maha.graha);
        assert_eq!(children.last().unwrap().end_jd, maha.end_jd);
        assert_contiguous(maha, &children);
    }
}

/// The child cycle starts at the parent's ruler, not the graha after it.
#[test]
fn self_starting_rotation_at_every_depth() {
    let anchor = Anchor::new(4, 0.1, y2k()).unwrap();
    let opts = DashaOptions::default().with_max_depth(5);
    let t = build_dasha_timeline(&anchor, &opts).unwrap();

    let mut parent = t.root_sequence()[2];
    for _ in 1..5 {
        let children = t.children_of(&parent);
        assert_eq!(children[0].graha, parent.graha);
        let next = (cycle_position(parent.graha) + 1) % VIMSHOTTARI_CYCLE.len();
        assert_ne!(children[0].graha, VIMSHOTTARI_CYCLE[next].graha);
        assert_contiguous(&parent, &children);
        parent = children[4];
    }
}

#[test]
fn proportional_durations() {
    let anchor = Anchor::new(20, 0.0, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    for maha in t.root_sequence() {
        let d = maha.duration_days();
        for child in t.children_of(maha) {
            let expected = d * graha_years(child.graha) as f64 / 120.0;
            assert!(
                (child.duration_days() - expected).abs() < 1e-6,
                "{} in {}: {} vs {}",
                child.graha.name(),
                maha.graha.name(),
                child.duration_days(),
                expected
            );
        }
    }
}

#[test]
fn children_idempotent() {
    let anchor = Anchor::new(1, 0.9, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let maha = t.root_sequence()[3];
    assert_eq!(t.children_of(&maha), t.children_of(&maha));

    let mut cache = ChildCache::new();
    assert_eq!(cache.children_of(&maha, 3), t.children_of(&maha));
    assert_eq!(cache.children_of(&maha, 3), t.children_of(&maha));
    assert_eq!(cache.hits(), 1);
}

/// Scenario 4: the second Mahadasha's start belongs to the second Mahadasha.
#[test]
fn boundary_instant_goes_to_next_sibling() {
    let anchor = Anchor::new(8, 0.0, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let second = t.root_sequence()[1];
    let chain = t.locate(second.start_jd, 1).unwrap();
    assert_eq!(chain, vec![second]);
}

#[test]
fn boundary_exclusivity_at_depth_two() {
    let anchor = Anchor::new(8, 0.0, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let maha = t.root_sequence()[2];
    let children = t.children_of(&maha);
    for w in children.windows(2) {
        let chain = t.locate(w[0].end_jd, 2).unwrap();
        assert_ne!(chain[1], w[0]);
        assert_eq!(chain[1], w[1]);
    }
}

/// Scenario 5: horizon past what the cap allows.
#[test]
fn horizon_beyond_cap_is_out_of_range() {
    let anchor = Anchor::new(0, 0.0, y2k()).unwrap();
    let opts = DashaOptions::default()
        .with_horizon_jd(y2k() + 400.0 * GREGORIAN_YEAR)
        .with_max_top_level_periods(9);
    assert!(matches!(
        build_dasha_timeline(&anchor, &opts),
        Err(DashaError::InstantOutOfRange { .. })
    ));

    // Widening the cap recovers.
    let widened = opts.with_max_top_level_periods(40);
    let t = build_dasha_timeline(&anchor, &widened).unwrap();
    assert!(t.locate(y2k() + 400.0 * GREGORIAN_YEAR, 3).is_ok());
}

/// Scenario 6: progress of 1.0 is rejected.
#[test]
fn full_progress_is_invalid_anchor() {
    assert!(matches!(
        Anchor::new(8, 1.0, y2k()),
        Err(DashaError::InvalidAnchor(_))
    ));
}

#[test]
fn query_outside_generated_range() {
    let anchor = Anchor::new(8, 0.0, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    assert!(matches!(
        t.locate(y2k() - 0.5, 1),
        Err(DashaError::InstantOutOfRange { .. })
    ));
    assert!(matches!(
        t.locate(t.end_jd(), 1),
        Err(DashaError::InstantOutOfRange { .. })
    ));
}

#[test]
fn depth_limits() {
    let anchor = Anchor::new(8, 0.0, y2k()).unwrap();
    assert_eq!(
        build_dasha_timeline(&anchor, &DashaOptions::default().with_max_depth(0)).unwrap_err(),
        DashaError::InvalidDepth(0)
    );
    assert!(matches!(
        build_dasha_timeline(
            &anchor,
            &DashaOptions::default().with_max_depth(MAX_DASHA_DEPTH + 1)
        ),
        Err(DashaError::DepthExceeded { .. })
    ));

    let t = build_dasha_timeline(&anchor, &DashaOptions::default().with_max_depth(2)).unwrap();
    assert!(matches!(
        t.locate(y2k(), 3),
        Err(DashaError::DepthExceeded {
            requested: 3,
            max: 2
        })
    ));
    let antar = t.children_of(&t.root_sequence()[0])[0];
    assert!(t.children_of(&antar).is_empty());
}

/// Re-deriving every flattened record through `locate` gives back the same chain.
#[test]
fn flatten_locate_round_trip() {
    let anchor = Anchor::new(17, 0.42, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let records = t.flatten(3).unwrap();
    assert_eq!(records.len(), 9 + 81 + 729);

    for r in &records {
        let chain = t.locate(r.start_jd, r.depth).unwrap();
        let last = chain.last().unwrap();
        assert_eq!(last.graha, r.graha);
        assert_eq!(last.depth, r.depth);
        let ancestors: Vec<Graha> = chain[..chain.len() - 1].iter().map(|p| p.graha).collect();
        assert_eq!(ancestors, r.parent_chain);
    }
}

#[test]
fn flatten_range_is_gapless_per_depth() {
    let anchor = Anchor::new(5, 0.2, y2k()).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let from = iso_to_jd("2010-01-01T00:00:00Z").unwrap();
    let to = iso_to_jd("2015-01-01T00:00:00Z").unwrap();
    let records = t.flatten_range(3, JdRange::new(from, to)).unwrap();
    assert!(!records.is_empty());
    for depth in 1..=3u8 {
        let level: Vec<_> = records.iter().filter(|r| r.depth == depth).collect();
        assert!(level.first().unwrap().start_jd <= from);
        assert!(level.last().unwrap().end_jd >= to);
        for w in level.windows(2) {
            assert_eq!(w[0].end_jd, w[1].start_jd);
        }
    }
}

#[test]
fn wire_records_serialize() {
    let anchor = Anchor::at_utc(8, 0.0, &UtcTime::date(2000, 1, 1)).unwrap();
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let records = t.records(2, None).unwrap();
    assert_eq!(records.len(), 90);
    let json = serde_json::to_string(&records[0]).unwrap();
    assert!(json.contains("\"planet\":\"Mercury\""));
    assert!(json.contains("\"startISO8601\":\"2000-01-01T00:00:00Z\""));
    assert!(json.contains("\"durationYearsApprox\":17.0"));
    assert!(json.contains("\"parentPlanetChain\":[]"));

    // 17 Gregorian years = 6209.1225 days; 2000-01-01 + 6209 d = 2016-12-31.
    assert_eq!(records[0].end_iso8601, "2016-12-31T02:56:24Z");
}

#[test]
fn julian_year_convention_is_longer() {
    let anchor = Anchor::new(0, 0.0, y2k()).unwrap();
    let greg = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    let jul = build_dasha_timeline(
        &anchor,
        &DashaOptions::default().with_year(YearConvention::Julian),
    )
    .unwrap();
    let drift = jul.end_jd() - greg.end_jd();
    assert!((drift - 120.0 * 0.0075).abs() < 1e-6);
}

#[test]
fn moon_longitude_anchor() {
    // 123.456 deg lies in Magha (index 9, Ketu).
    let anchor = Anchor::from_moon_longitude(123.456, y2k()).unwrap();
    assert_eq!(anchor.nakshatra_index(), 9);
    assert_eq!(anchor.lord().graha, Graha::Ketu);
    let t = build_dasha_timeline(&anchor, &DashaOptions::default()).unwrap();
    assert!(t.root_sequence()[0].duration_days() < 7.0 * GREGORIAN_YEAR);
}

#[test]
fn deep_chain_stays_contiguous() {
    let anchor = Anchor::new(2, 0.0, y2k()).unwrap();
    let opts = DashaOptions::default().with_max_depth(MAX_DASHA_DEPTH);
    let t = build_dasha_timeline(&anchor, &opts).unwrap();
    let q = y2k() + 1234.5678;
    let chain = t.locate(q, 6).unwrap();
    assert_eq!(chain.len(), 6);
    for pair in chain.windows(2) {
        assert!(pair[1].start_jd >= pair[0].start_jd && pair[1].end_jd <= pair[0].end_jd);
        assert!(pair[1].contains(q));
    }
}
