use sitebuilder_core::model::project::{HOME_PAGE_NAME, NEW_PAGE_NAME, NEW_PAGE_PATH};
use sitebuilder_core::{
    DocumentStore, MemoryKeyValueStore, SectionData, SectionPatch, SectionType, StoreEvent,
    TextData, Theme,
};
use std::sync::{Arc, Mutex};

fn setup() -> DocumentStore<MemoryKeyValueStore> {
    let mut store = DocumentStore::new(MemoryKeyValueStore::new());
    store.initialize();
    store
}

#[test]
fn initialize_without_saved_data_bootstraps_default_project() {
    let store = setup();
    let project = store.project();

    assert_eq!(project.pages.len(), 1);
    let home = &project.pages[0];
    assert_eq!(home.name, "Home");
    assert_eq!(home.path, "/");
    assert_eq!(home.sections.len(), 1);
    match &home.sections[0].data {
        SectionData::Text(TextData { heading, body }) => {
            assert!(!heading.is_empty());
            assert!(!body.is_empty());
        }
        other => panic!("expected text section, got {other:?}"),
    }
    assert_eq!(store.active_page_id(), Some(home.id.as_str()));
    assert_eq!(store.selected_section_id(), None);
    assert!(store.storage().load().is_some(), "default project is persisted");
}

#[test]
fn initialize_prefers_persisted_project() {
    let mut first = setup();
    first.set_project_name("Saved Site");
    first.add_page();
    assert!(first.save_to_storage());
    let saved = first.snapshot();

    let backend = MemoryKeyValueStore::new();
    let mut second = DocumentStore::new(backend);
    second.storage().save(&saved);
    second.initialize();

    assert_eq!(second.project(), saved.as_ref());
    assert_eq!(second.active_page_id(), Some(saved.pages[0].id.as_str()));
}

#[test]
fn add_page_appends_and_activates_without_dedup() {
    let mut store = setup();
    let first = store.add_page();
    let second = store.add_page();

    let pages = &store.project().pages;
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1].id, first);
    assert_eq!(pages[2].id, second);
    assert!(pages[1..]
        .iter()
        .all(|page| page.name == NEW_PAGE_NAME && page.path == NEW_PAGE_PATH));
    assert!(pages[2].sections.is_empty());
    assert_eq!(store.active_page_id(), Some(second.as_str()));
}

#[test]
fn deleting_last_page_substitutes_empty_home() {
    let mut store = setup();
    let only = store.project().pages[0].id.clone();

    assert!(store.delete_page(&only));

    let pages = &store.project().pages;
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].name, HOME_PAGE_NAME);
    assert_eq!(pages[0].path, "/");
    assert!(pages[0].sections.is_empty());
    assert_ne!(pages[0].id, only);
    assert_eq!(store.active_page_id(), Some(pages[0].id.as_str()));
}

#[test]
fn page_count_never_drops_below_one() {
    let mut store = setup();
    store.add_page();
    store.add_page();

    for _ in 0..5 {
        let target = store.project().pages[0].id.clone();
        store.delete_page(&target);
        assert!(!store.project().pages.is_empty());
    }
}

#[test]
fn deleting_active_page_moves_activation_and_clears_selection() {
    let mut store = setup();
    let home = store.project().pages[0].id.clone();
    let extra = store.add_page();
    store.add_section(SectionType::Text);
    assert!(store.selected_section_id().is_some());

    assert!(store.delete_page(&extra));

    assert_eq!(store.active_page_id(), Some(home.as_str()));
    assert_eq!(store.selected_section_id(), None);
}

#[test]
fn deleting_inactive_page_keeps_activation_and_selection() {
    let mut store = setup();
    let extra = store.add_page();
    let home = store.project().pages[0].id.clone();
    store.set_active_page(&home);
    let section = store.add_section(SectionType::Image).unwrap();

    assert!(store.delete_page(&extra));

    assert_eq!(store.active_page_id(), Some(home.as_str()));
    assert_eq!(store.selected_section_id(), Some(section.as_str()));
}

#[test]
fn rename_page_stamps_updated_at_and_ignores_unknown_ids() {
    let mut store = setup();
    let home = store.project().pages[0].clone();

    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(store.rename_page(&home.id, "Start"));
    let renamed = store.project().page(&home.id).unwrap();
    assert_eq!(renamed.name, "Start");
    assert!(renamed.updated_at > home.updated_at);

    let before = store.snapshot();
    assert!(!store.rename_page("missing", "Nope"));
    assert_eq!(store.project(), before.as_ref());
}

#[test]
fn set_active_page_always_clears_selection() {
    let mut store = setup();
    let home = store.project().pages[0].id.clone();
    let section = store.project().pages[0].sections[0].id.clone();
    assert!(store.set_selected_section(Some(&section)));

    let other = store.add_page();
    assert!(store.set_active_page(&home));
    assert!(store.set_selected_section(Some(&section)));
    assert!(store.set_active_page(&other));
    assert_eq!(store.selected_section_id(), None);

    assert!(store.set_active_page(&home));
    assert_eq!(store.selected_section_id(), None);
    assert!(!store.set_active_page("missing"));
    assert_eq!(store.active_page_id(), Some(home.as_str()));
}

#[test]
fn add_section_appends_placeholder_and_selects_it() {
    let mut store = setup();
    let before = store.active_page().unwrap().updated_at;
    std::thread::sleep(std::time::Duration::from_millis(5));

    let id = store.add_section(SectionType::Button).unwrap();

    let page = store.active_page().unwrap();
    assert_eq!(page.sections.len(), 2);
    assert_eq!(page.sections[1].id, id);
    assert_eq!(page.sections[1].kind(), SectionType::Button);
    assert!(page.updated_at > before);
    assert_eq!(store.selected_section_id(), Some(id.as_str()));
    assert_eq!(store.selected_section().map(|s| s.id.as_str()), Some(id.as_str()));
}

#[test]
fn section_operations_require_an_active_page() {
    let mut store = DocumentStore::new(MemoryKeyValueStore::new());
    let before = store.snapshot();

    assert_eq!(store.add_section(SectionType::Text), None);
    assert!(!store.delete_section("any"));
    assert!(!store.update_section("any", &SectionPatch::default().heading("x")));
    assert!(!store.reorder_sections(Vec::new()));
    assert_eq!(store.project(), before.as_ref());
}

#[test]
fn deleting_selected_section_clears_selection() {
    let mut store = setup();
    let keep = store.add_section(SectionType::Text).unwrap();
    let doomed = store.add_section(SectionType::Image).unwrap();
    assert_eq!(store.selected_section_id(), Some(doomed.as_str()));

    assert!(store.delete_section(&doomed));
    assert_eq!(store.selected_section_id(), None);
    assert!(store.active_page().unwrap().section(&doomed).is_none());

    assert!(store.set_selected_section(Some(&keep)));
    let other = store.active_page().unwrap().sections[0].id.clone();
    assert!(store.delete_section(&other));
    assert_eq!(store.selected_section_id(), Some(keep.as_str()));
}

#[test]
fn update_section_merges_only_given_fields() {
    let mut store = setup();
    let section = store.active_page().unwrap().sections[0].clone();
    let SectionData::Text(original) = &section.data else {
        panic!("starter section should be text");
    };

    assert!(store.update_section(&section.id, &SectionPatch::default().heading("X")));

    let updated = store.active_page().unwrap().section(&section.id).unwrap();
    assert_eq!(updated.kind(), SectionType::Text);
    assert_eq!(
        updated.data,
        SectionData::Text(TextData {
            heading: "X".to_string(),
            body: original.body.clone(),
        })
    );
}

#[test]
fn update_section_never_changes_type() {
    let mut store = setup();
    let id = store.add_section(SectionType::Image).unwrap();

    let patch = SectionPatch::default().heading("H").label("L").alt("A");
    assert!(store.update_section(&id, &patch));

    let section = store.active_page().unwrap().section(&id).unwrap();
    assert_eq!(section.kind(), SectionType::Image);
    let SectionData::Image(data) = &section.data else {
        panic!("type changed");
    };
    assert_eq!(data.alt, "A");
}

#[test]
fn reorder_sections_installs_exact_permutation() {
    let mut store = setup();
    let a = store.active_page().unwrap().sections[0].clone();
    store.add_section(SectionType::Image);
    store.add_section(SectionType::Button);
    let sections = store.active_page().unwrap().sections.clone();
    let (b, c) = (sections[1].clone(), sections[2].clone());

    assert!(store.reorder_sections(vec![c.clone(), a.clone(), b.clone()]));

    assert_eq!(
        store.active_page().unwrap().section_ids(),
        vec![c.id, a.id, b.id]
    );
}

#[test]
fn reorder_dropping_selected_section_clears_selection() {
    let mut store = setup();
    let kept = store.active_page().unwrap().sections.clone();
    let dropped = store.add_section(SectionType::Button).unwrap();
    assert_eq!(store.selected_section_id(), Some(dropped.as_str()));

    assert!(store.reorder_sections(kept));

    assert_eq!(store.selected_section_id(), None);
    assert!(store.selected_section().is_none());
    assert!(store.active_page_id().is_some());
}

#[test]
fn reorder_keeping_selected_section_keeps_selection() {
    let mut store = setup();
    let selected = store.add_section(SectionType::Image).unwrap();
    let mut sections = store.active_page().unwrap().sections.clone();
    sections.reverse();

    assert!(store.reorder_sections(sections));
    assert_eq!(store.selected_section_id(), Some(selected.as_str()));
}

#[test]
fn section_edits_stamp_page_updated_at() {
    fn pause() {
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let mut store = setup();
    let first = store.active_page().unwrap().sections[0].id.clone();
    let extra = store.add_section(SectionType::Image).unwrap();

    let before = store.active_page().unwrap().updated_at;
    pause();
    assert!(store.update_section(&first, &SectionPatch::default().body("Changed")));
    let after_update = store.active_page().unwrap().updated_at;
    assert!(after_update > before);

    pause();
    let mut reversed = store.active_page().unwrap().sections.clone();
    reversed.reverse();
    assert!(store.reorder_sections(reversed));
    let after_reorder = store.active_page().unwrap().updated_at;
    assert!(after_reorder > after_update);

    pause();
    assert!(store.delete_section(&extra));
    assert!(store.active_page().unwrap().updated_at > after_reorder);
}

#[test]
fn set_selected_section_rejects_sections_outside_active_page() {
    let mut store = setup();
    let home_section = store.active_page().unwrap().sections[0].id.clone();
    store.add_page();

    assert!(!store.set_selected_section(Some(&home_section)));
    assert_eq!(store.selected_section_id(), None);
    assert!(store.set_selected_section(None));
}

#[test]
fn theme_and_name_are_plain_replacements() {
    let mut store = setup();
    store.set_theme(Theme::Dark);
    assert_eq!(store.project().theme, Theme::Dark);
    assert_eq!(store.toggle_theme(), Theme::Light);
    store.set_project_name("");
    assert_eq!(store.project().name, "");
}

#[test]
fn preview_page_falls_back_to_home() {
    let store = DocumentStore::new(MemoryKeyValueStore::new());
    assert!(store.active_page().is_none());
    assert_eq!(
        store.preview_page().map(|page| page.id.as_str()),
        store.project().pages.first().map(|page| page.id.as_str())
    );
}

#[test]
fn subscribers_see_each_effective_change() {
    let mut store = setup();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    store.set_project_name("Observed");
    let section = store.add_section(SectionType::Text).unwrap();

    {
        let seen = events.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(matches!(&seen[0], StoreEvent::ProjectChanged(p) if p.name == "Observed"));
        assert!(matches!(
            &seen[1],
            StoreEvent::ProjectChanged(p) if p.pages[0].sections.len() == 2
        ));
        assert!(matches!(
            &seen[2],
            StoreEvent::SelectionChanged { selected_section_id: Some(id), .. } if *id == section
        ));
    }

    assert!(store.unsubscribe(subscription));
    store.set_project_name("Unobserved");
    assert_eq!(events.lock().unwrap().len(), 3);
}
