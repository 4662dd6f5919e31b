//! End-to-end tests: parse raw text, persist drafts, read the tree back.

use guidesmith::import::{GuideImportRequest, ImportFormat, parse_request};
use guidesmith::storage::{Database, GuideStore};

fn import_into(db: &mut Database, guide: i64, format: ImportFormat, text: &str) {
    let request = GuideImportRequest {
        guide_id: guide,
        format,
        raw_text: text.into(),
        base_position: db.next_flow_box_position(guide).unwrap(),
    };
    let outcome = parse_request(&request).unwrap();
    db.persist_import(guide, &outcome.flows).unwrap();
}

#[test]
fn csv_import_materializes_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open(&dir.path().join("guides.db")).unwrap();
    let guide = db.create_guide("Onboarding").unwrap();

    import_into(
        &mut db,
        guide,
        ImportFormat::Csv,
        "Flow Name,Flow Description,Step Title,Content\n\
         Setup,Get ready,Install SDK,Run npm install\n\
         Setup,,Configure,Edit config.toml\n\
         Deploy,Go live,Ship it,Push to main\n",
    );

    let boxes = db.flow_boxes(guide).unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].title, "Setup");
    assert_eq!(boxes[0].description, "Get ready");
    assert_eq!(boxes[0].position, 1);
    assert_eq!(boxes[1].title, "Deploy");
    assert_eq!(boxes[1].position, 2);

    let setup_steps = db.steps(boxes[0].id).unwrap();
    assert_eq!(setup_steps.len(), 2);
    assert_eq!(setup_steps[0].title, "Install SDK");
    assert_eq!(setup_steps[0].content, "Run npm install");
    assert_eq!(setup_steps[0].position, 1);
    assert_eq!(setup_steps[1].position, 2);
}

#[test]
fn reimport_appends_after_existing_flows() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open(&dir.path().join("guides.db")).unwrap();
    let guide = db.create_guide("Onboarding").unwrap();

    import_into(
        &mut db,
        guide,
        ImportFormat::Markdown,
        "## First\n### A\na\n",
    );
    import_into(
        &mut db,
        guide,
        ImportFormat::Markdown,
        "## Second\n### B\nb\n## Third\n### C\nc\n",
    );

    let positions: Vec<_> = db
        .flow_boxes(guide)
        .unwrap()
        .iter()
        .map(|f| (f.title.clone(), f.position))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("First".to_string(), 1),
            ("Second".to_string(), 2),
            ("Third".to_string(), 3),
        ]
    );
}

#[test]
fn rejected_import_leaves_guide_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open(&dir.path().join("guides.db")).unwrap();
    let guide = db.create_guide("Onboarding").unwrap();

    import_into(&mut db, guide, ImportFormat::Markdown, "## Keep\n### K\nk\n");

    let request = GuideImportRequest {
        guide_id: guide,
        format: ImportFormat::Markdown,
        raw_text: "### Orphan step\n".into(),
        base_position: db.next_flow_box_position(guide).unwrap(),
    };
    assert!(parse_request(&request).is_err());

    let boxes = db.flow_boxes(guide).unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].title, "Keep");
}

#[test]
fn empty_markdown_flows_persist_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open(&dir.path().join("guides.db")).unwrap();
    let guide = db.create_guide("Onboarding").unwrap();

    import_into(
        &mut db,
        guide,
        ImportFormat::Markdown,
        "## Placeholder\n## Real\n### Step\nx\n",
    );

    let boxes = db.flow_boxes(guide).unwrap();
    assert_eq!(boxes.len(), 2);
    assert!(db.steps(boxes[0].id).unwrap().is_empty());
    assert_eq!(db.steps(boxes[1].id).unwrap().len(), 1);
}

#[test]
fn database_reopens_with_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guides.db");
    let guide = {
        let mut db = Database::open(&path).unwrap();
        let guide = db.create_guide("Persistent").unwrap();
        import_into(&mut db, guide, ImportFormat::Markdown, "## F\n### S\nx\n");
        guide
    };

    let db = Database::open(&path).unwrap();
    assert_eq!(db.guide(guide).unwrap().unwrap().title, "Persistent");
    assert_eq!(db.flow_boxes(guide).unwrap().len(), 1);
}
