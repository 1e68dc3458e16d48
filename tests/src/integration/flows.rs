//! # Integration Test Flows
//!
//! Tests that `shared-suites` ciphersuites and the `nego-header` writer
//! work together the way a sender and its recipients use them.
//!
//! ## Flows Tested:
//!
//! 1. **Sender layout**: hashed suites laid out without overlap
//! 2. **Recipient scan**: every placement is found among the candidate
//!    positions a recipient derives independently from the suite name
//! 3. **Collisions**: rigged suites force probe shadowing and exhaustion
//! 4. **Determinism**: independent writers agree on every layout

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nego_header::{
        Entry, ErrorKind, HeaderLayoutApi, HeaderWriter, LayoutMetrics, LevelBound, NegoError,
        PositionSet, SuiteLevels, TracingObserver,
    };
    use shared_suites::{Ciphersuite, FixedStream, HashAlgorithm, KeyStream, NamedSuite};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Suite with scripted position tags
    #[derive(Debug)]
    struct RiggedSuite {
        name: &'static str,
        tags: Vec<u32>,
    }

    impl Ciphersuite for RiggedSuite {
        fn name(&self) -> &str {
            self.name
        }

        fn point_len(&self) -> usize {
            8
        }

        fn hash_algorithm(&self) -> HashAlgorithm {
            HashAlgorithm::Blake3
        }

        fn position_stream(&self, _seed: &[u8]) -> Box<dyn KeyStream> {
            Box::new(FixedStream::from_tags(&self.tags))
        }
    }

    fn rigged(name: &'static str, tags: &[u32]) -> (Arc<dyn Ciphersuite>, LevelBound) {
        let bound = LevelBound::new(tags.len()).unwrap();
        let suite = RiggedSuite {
            name,
            tags: tags.to_vec(),
        };
        (Arc::new(suite), bound)
    }

    fn standard_suites(bound: usize) -> SuiteLevels {
        let bound = LevelBound::new(bound).unwrap();
        SuiteLevels::new()
            .with(Arc::new(NamedSuite::ed25519()), bound)
            .and_then(|s| s.with(Arc::new(NamedSuite::curve448()), bound))
            .and_then(|s| s.with(Arc::new(NamedSuite::p256()), bound))
            .unwrap()
    }

    fn suite_set(suites: Vec<(Arc<dyn Ciphersuite>, LevelBound)>) -> SuiteLevels {
        let mut levels = SuiteLevels::new();
        for (suite, bound) in suites {
            levels.insert(suite, bound).unwrap();
        }
        levels
    }

    fn entry_for(suite: NamedSuite, entry_len: usize) -> Entry {
        let key = vec![0x42; suite.point_len()];
        Entry::new(Arc::new(suite), key, vec![0x17; entry_len])
    }

    /// Check the invariants every successful layout must hold
    fn assert_layout_sound(writer: &HeaderWriter, suites: &SuiteLevels) {
        let layout = writer.layout().expect("layout present after init");
        let placements = layout.placements();
        assert_eq!(placements.len(), suites.len());

        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                assert!(
                    a.end() <= b.offset || b.end() <= a.offset,
                    "{} and {} overlap",
                    a.suite,
                    b.suite
                );
            }
        }

        let furthest = placements.iter().map(|p| p.end()).max().unwrap_or(0);
        assert_eq!(layout.header_len(), furthest);
        assert_eq!(writer.reservations().count(), suites.len());
    }

    // =============================================================================
    // SENDER LAYOUT
    // =============================================================================

    #[test]
    fn test_standard_suites_layout() {
        let suites = standard_suites(6);
        let entries = vec![
            entry_for(NamedSuite::ed25519(), 48),
            entry_for(NamedSuite::curve448(), 48),
            entry_for(NamedSuite::p256(), 48),
        ];
        let mut writer = HeaderWriter::new();

        assert_eq!(writer.init(&suites, 48, &entries), Ok(728));
        assert_layout_sound(&writer, &suites);

        let layout = writer.layout().unwrap();
        assert_eq!(layout.processing_order(), vec!["Ed25519", "P256", "Curve448"]);
        let placed: Vec<_> = layout
            .placements()
            .iter()
            .map(|p| (p.suite.as_str(), p.level, p.offset))
            .collect();
        assert_eq!(
            placed,
            vec![("Ed25519", 0, 0), ("P256", 2, 384), ("Curve448", 3, 672)]
        );
    }

    #[test]
    fn test_standard_suites_header_grows_with_bound() {
        let mut writer = HeaderWriter::new();

        // Bounds 4 to 7 share the same lowest free levels.
        for bound in 4..=7 {
            assert_eq!(writer.init(&standard_suites(bound), 32, &[]), Ok(728), "bound {bound}");
        }

        // At bound 8 Ed25519's level 7 probe (7104-7136) blocks Curve448's level 6 (7056-7112).
        assert_eq!(writer.init(&standard_suites(8), 32, &[]), Ok(12376));
        let layout = writer.layout().unwrap();
        assert_eq!(layout.level_of("Ed25519"), Some(0));
        assert_eq!(layout.level_of("P256"), Some(2));
        assert_eq!(layout.placement("Curve448").map(|p| (p.level, p.offset)), Some((7, 12320)));
        assert_layout_sound(&writer, &standard_suites(8));
    }

    #[test]
    fn test_standard_suites_exhaust_at_small_bounds() {
        let mut writer = HeaderWriter::new();

        // Every suite sits at offset 0; Curve448 follows Ed25519 there.
        assert_eq!(
            writer.init(&standard_suites(1), 32, &[]),
            Err(NegoError::PlacementExhausted {
                suite: "Curve448".to_string(),
                level: 0,
                lo: 0,
                hi: 56,
            })
        );

        // P256's last resort at 384-448 overlaps Curve448's level 2 at 336-392.
        assert_eq!(
            writer.init(&standard_suites(3), 32, &[]),
            Err(NegoError::PlacementExhausted {
                suite: "P256".to_string(),
                level: 2,
                lo: 384,
                hi: 448,
            })
        );
        assert_eq!(writer.reservations().count(), 0);
    }

    #[test]
    fn test_suites_without_entries_are_still_laid_out() {
        let suites = standard_suites(6);
        let entries = vec![entry_for(NamedSuite::p256(), 32)];
        let mut writer = HeaderWriter::new();

        assert_eq!(writer.init(&suites, 32, &entries), Ok(728));
        let layout = writer.layout().unwrap();
        assert!(layout.placement("Ed25519").is_some());
        assert!(layout.placement("Curve448").is_some());
    }

    #[test]
    fn test_entries_do_not_change_layout() {
        let suites = standard_suites(5);
        let mut bare = HeaderWriter::new();
        let mut loaded = HeaderWriter::new();

        let entries = vec![
            entry_for(NamedSuite::ed25519(), 24),
            entry_for(NamedSuite::ed25519(), 24),
            entry_for(NamedSuite::curve448(), 24),
        ];

        assert_eq!(bare.init(&suites, 24, &[]), loaded.init(&suites, 24, &entries));
        assert_eq!(bare.layout(), loaded.layout());
    }

    #[test]
    fn test_foreign_entry_rejected_before_layout() {
        let suites = standard_suites(4);
        let foreign = NamedSuite::new("X25519", 32, HashAlgorithm::Sha256);
        let mut writer = HeaderWriter::new();

        let err = writer
            .init(&suites, 16, &[entry_for(foreign, 16)])
            .unwrap_err();

        assert_eq!(
            err,
            NegoError::UnknownEntrySuite {
                index: 0,
                suite: "X25519".to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert!(writer.layout().is_none());
    }

    // =============================================================================
    // RECIPIENT SCAN
    // =============================================================================

    #[test]
    fn test_recipient_finds_its_point_among_candidates() {
        let suites = standard_suites(8);
        let mut writer = HeaderWriter::new();
        assert_eq!(writer.init(&suites, 32, &[]), Ok(12376));
        let layout = writer.layout().unwrap();

        // A recipient knows only its suite's public name and the bound.
        for (suite, bound) in [
            (NamedSuite::ed25519(), 8),
            (NamedSuite::curve448(), 8),
            (NamedSuite::p256(), 8),
        ] {
            let name = suite.name().to_string();
            let set = PositionSet::derive(Arc::new(suite), LevelBound::new(bound).unwrap());
            let placement = layout.placement(&name).unwrap();

            let found: Vec<_> = set
                .candidates()
                .filter(|(_, range)| range.lo() == placement.offset)
                .map(|(level, _)| level)
                .collect();
            assert_eq!(found, vec![placement.level], "{name}");
        }
    }

    // =============================================================================
    // COLLISIONS
    // =============================================================================

    #[test]
    fn test_probe_reservations_shadow_later_suites() {
        // 8-byte points. Footprints: b 16, a 24, c 40.
        //   b: L0 0-8, L1 8-16
        //   a: L0 0-8, L1 16-24
        //   c: L0 0-8, L1 8-16, L2 32-40
        // c cannot take 8-16 while b's probe holds it, even though b ends at level 0.
        let suites = suite_set(vec![
            rigged("a", &[0, 1]),
            rigged("b", &[0, 0]),
            rigged("c", &[0, 0, 1]),
        ]);
        let mut writer = HeaderWriter::new();

        let header_len = writer.init(&suites, 16, &[]).unwrap();
        let layout = writer.layout().unwrap();

        assert_eq!(header_len, 40);
        assert_eq!(layout.processing_order(), vec!["b", "a", "c"]);
        assert_eq!(layout.level_of("b"), Some(0));
        assert_eq!(layout.level_of("a"), Some(1));
        assert_eq!(layout.level_of("c"), Some(2));

        let ranges: Vec<_> = writer
            .reservations()
            .map(|n| (n.suite.as_str(), n.range.lo(), n.range.hi()))
            .collect();
        assert_eq!(ranges, vec![("b", 0, 8), ("a", 16, 24), ("c", 32, 40)]);
    }

    #[test]
    fn test_exhaustion_then_recovery_with_wider_bound() {
        let metrics = Arc::new(LayoutMetrics::new());
        let mut writer = HeaderWriter::new().with_observer(metrics.clone());

        let cramped = suite_set(vec![rigged("first", &[0]), rigged("second", &[0])]);
        let err = writer.init(&cramped, 16, &[]).unwrap_err();

        assert_eq!(
            err,
            NegoError::PlacementExhausted {
                suite: "second".to_string(),
                level: 0,
                lo: 0,
                hi: 8,
            }
        );
        assert_eq!(err.exhausted_suite(), Some("second"));
        assert!(writer.layout().is_none());
        assert_eq!(writer.reservations().count(), 0);

        let widened = suite_set(vec![rigged("first", &[0]), rigged("second", &[0, 1])]);
        assert_eq!(writer.init(&widened, 16, &[]), Ok(24));
        assert_eq!(writer.layout().unwrap().level_of("second"), Some(1));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.plans_failed, 1);
        assert_eq!(snapshot.plans_completed, 1);
        assert_eq!(snapshot.last_header_len, 24);
    }

    // =============================================================================
    // DETERMINISM
    // =============================================================================

    #[test]
    fn test_independent_writers_agree() {
        let mut sender = HeaderWriter::new().with_observer(Arc::new(TracingObserver::new()));
        let mut auditor = HeaderWriter::new();

        for bound in 2..=6 {
            let a = sender.init(&standard_suites(bound), 32, &[]);
            let b = auditor.init(&standard_suites(bound), 32, &[]);
            assert_eq!(a, b, "bound {bound}");
            assert_eq!(sender.layout(), auditor.layout(), "bound {bound}");
        }
    }

    #[test]
    fn test_layout_survives_serialization() {
        let suites = suite_set(vec![rigged("a", &[0, 1]), rigged("b", &[0, 0])]);
        let mut writer = HeaderWriter::new();
        writer.init(&suites, 16, &[]).unwrap();

        let layout = writer.layout().unwrap();
        let json = serde_json::to_string(layout).unwrap();
        let restored: nego_header::Layout = serde_json::from_str(&json).unwrap();

        assert_eq!(&restored, layout);
        assert_eq!(restored.chosen_levels().get("a"), Some(&1));
    }

    proptest::proptest! {
        #[test]
        fn prop_layout_depends_only_on_suites(
            specs in proptest::collection::vec((1usize..96, 1usize..6, 0usize..5), 1..10)
        ) {
            let algorithms = [
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha512,
                HashAlgorithm::Sha3_256,
                HashAlgorithm::Shake256,
                HashAlgorithm::Blake3,
            ];
            let build = || {
                let mut suites = SuiteLevels::new();
                for (i, (point_len, bound, alg)) in specs.iter().enumerate() {
                    let suite = NamedSuite::new(format!("prop-{i}"), *point_len, algorithms[*alg]);
                    suites.insert(Arc::new(suite), LevelBound::new(*bound).unwrap()).unwrap();
                }
                suites
            };

            let mut first = HeaderWriter::new();
            let mut second = HeaderWriter::new();
            let a = first.init(&build(), 8, &[]);
            let b = second.init(&build(), 8, &[]);

            proptest::prop_assert_eq!(&a, &b);
            proptest::prop_assert_eq!(first.layout(), second.layout());
            if a.is_err() {
                proptest::prop_assert_eq!(first.reservations().count(), 0);
            }
        }
    }
}
