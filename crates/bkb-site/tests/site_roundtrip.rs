use bkb_core::{BiomarkerRecord, DocumentKey};
use bkb_site::{Catalog, DocumentStore, FetchError, SiteIndex, write_site};
use pretty_assertions::assert_eq;

fn records() -> Vec<BiomarkerRecord> {
    vec![
        BiomarkerRecord::new(1, "Lipids", "Non-HDL Cholesterol", "Non-HDL 胆固醇"),
        BiomarkerRecord::new(2, "Lipids", "LDL Cholesterol", "低密度脂蛋白胆固醇"),
        BiomarkerRecord::new(3, "Liver/Kidney", "Albumin", "白蛋白"),
    ]
}

#[test]
fn written_index_reads_back_and_locates_built_documents() {
    let dir = tempfile::tempdir().unwrap();
    let site_dir = dir.path().join("docs");
    let assets_dir = site_dir.join("assets");
    let records = records();

    let files = write_site(&site_dir, &records, "assets").unwrap();
    assert_eq!(files.entries, 3);
    assert_eq!(files.categories, 2);

    let json = std::fs::read_to_string(&files.index_json).unwrap();
    let index: SiteIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(index.total, 3);
    assert_eq!(index.asset_prefix, "assets");

    let names: Vec<_> = index
        .categories
        .groups()
        .iter()
        .map(|g| g.category.as_str())
        .collect();
    assert_eq!(names, vec!["Lipids", "Liver-Kidney"]);

    // Write one document where the builder would, then find it from the index.
    let albumin = DocumentKey::for_record(&records[2]);
    std::fs::create_dir_all(assets_dir.join(&albumin.category_dir)).unwrap();
    std::fs::write(
        albumin.path_in(&assets_dir),
        "```markdown\n# Albumin\n```\n",
    )
    .unwrap();

    let store = DocumentStore::new(&assets_dir);
    let (category, entry) = index.categories.find(3).unwrap();
    let key = Catalog::key_of(category, entry);
    assert_eq!(key, albumin);
    assert_eq!(store.fetch_rendered(&key).unwrap(), "# Albumin");

    // A listed but unbuilt record reports not-found instead of failing the page.
    let (category, entry) = index.categories.find(1).unwrap();
    let missing = store.fetch(&Catalog::key_of(category, entry));
    assert!(matches!(missing, Err(FetchError::NotFound { .. })));
}

#[test]
fn search_over_loaded_index_matches_either_name() {
    let index = SiteIndex::new(&records(), "assets");

    let hits = index.categories.search("cholesterol");
    assert_eq!(hits.len(), 2);

    let hits = index.categories.search("白蛋白");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.groups()[0].category, "Liver-Kidney");

    assert_eq!(index.categories.search("").len(), 3);
    assert!(index.categories.search("glucose").is_empty());
}
