//! Property tests for the import core's documented invariants.

use proptest::prelude::*;

use guidesmith::import::{
    FlowBoxDraft, GuideImportRequest, ImportFormat, StepDraft, assembler, import_structure,
    parse_request,
};

/// Titles that survive trimming unchanged and are safe in unquoted CSV.
fn arb_title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,11}"
}

fn arb_flow() -> impl Strategy<Value = FlowBoxDraft> {
    (
        arb_title(),
        ".{0,24}",
        prop::collection::vec((arb_title(), ".{0,40}"), 0..5),
    )
        .prop_map(|(title, description, steps)| {
            let mut flow = FlowBoxDraft::new(title, description.trim().to_owned());
            flow.steps = steps
                .into_iter()
                .map(|(t, c)| StepDraft::new(t, c))
                .collect();
            flow
        })
}

fn csv_request(rows: &[(String, String)], base: i64) -> GuideImportRequest {
    let mut text = String::from("Flow Name,Flow Description,Step Title,Content\n");
    for (flow, step) in rows {
        text.push_str(&format!("{flow},,{step},content\n"));
    }
    GuideImportRequest {
        guide_id: 1,
        format: ImportFormat::Csv,
        raw_text: text,
        base_position: base,
    }
}

proptest! {
    #[test]
    fn single_flow_csv_has_one_flow_with_all_steps(
        flow_name in arb_title(),
        step_titles in prop::collection::vec(arb_title(), 1..20),
    ) {
        let rows: Vec<_> = step_titles
            .iter()
            .map(|s| (flow_name.clone(), s.clone()))
            .collect();
        let outcome = parse_request(&csv_request(&rows, 1)).unwrap();
        prop_assert_eq!(outcome.flows.len(), 1);
        prop_assert_eq!(outcome.flows[0].steps.len(), step_titles.len());
    }

    #[test]
    fn flow_count_equals_name_changes(
        names in prop::collection::vec(prop_oneof![Just("Setup"), Just("Deploy"), Just("Verify")], 1..30),
    ) {
        let rows: Vec<_> = names
            .iter()
            .map(|n| ((*n).to_string(), "Step".to_string()))
            .collect();
        let expected = 1 + names.windows(2).filter(|w| w[0] != w[1]).count();
        let outcome = parse_request(&csv_request(&rows, 1)).unwrap();
        prop_assert_eq!(outcome.flows.len(), expected);
    }

    #[test]
    fn assembler_is_idempotent(
        mut flows in prop::collection::vec(arb_flow(), 0..6),
        base in 1i64..1000,
    ) {
        assembler::assign_positions(&mut flows, base).unwrap();
        let first = flows.clone();
        assembler::assign_positions(&mut flows, base).unwrap();
        prop_assert_eq!(first, flows);
    }

    #[test]
    fn assembled_positions_are_strictly_increasing(
        mut flows in prop::collection::vec(arb_flow(), 1..6),
        base in 1i64..1000,
    ) {
        assembler::assign_positions(&mut flows, base).unwrap();
        prop_assert_eq!(flows[0].source_position, base);
        prop_assert!(flows.windows(2).all(|w| w[0].source_position < w[1].source_position));
        for flow in &flows {
            prop_assert!(
                flow.steps.iter().enumerate().all(|(i, s)| s.source_position == i as i64 + 1)
            );
        }
    }

    #[test]
    fn report_counts_always_reconcile(
        rows in prop::collection::vec((arb_title(), arb_title()), 0..30),
    ) {
        let (result, _) = import_structure(&csv_request(&rows, 1));
        prop_assert!(result.success);
        prop_assert_eq!(result.results.flow_boxes_created, result.results.flows.len());
        let summed: usize = result.results.flows.iter().map(|f| f.step_count).sum();
        prop_assert_eq!(result.results.steps_created, summed);
    }

    #[test]
    fn markdown_roundtrip_preserves_structure(
        flows in prop::collection::vec(
            (arb_title(), prop::collection::vec(arb_title(), 1..4)),
            1..5,
        ),
    ) {
        let mut text = String::new();
        for (flow, steps) in &flows {
            text.push_str(&format!("## {flow}\n"));
            for step in steps {
                text.push_str(&format!("### {step}\nbody of {step}\n"));
            }
        }
        let request = GuideImportRequest {
            guide_id: 1,
            format: ImportFormat::Markdown,
            raw_text: text,
            base_position: 1,
        };
        let outcome = parse_request(&request).unwrap();
        prop_assert_eq!(outcome.flows.len(), flows.len());
        for (parsed, (title, steps)) in outcome.flows.iter().zip(&flows) {
            prop_assert_eq!(&parsed.title, title);
            prop_assert_eq!(parsed.steps.len(), steps.len());
        }
    }
}
