// tests/table_export.rs
use std::fs;
use std::path::PathBuf;

use tcg_scrape::audit::missing_card_ids;
use tcg_scrape::csv::to_export_string;
use tcg_scrape::file::write_export;
use tcg_scrape::progress::Tally;
use tcg_scrape::record::headers;
use tcg_scrape::runner::find_card;
use tcg_scrape::s;
use tcg_scrape::{
    extract_table, AppOptions, Enrichment, ExportFormat, ExtractOptions, Field, NoEnrichment,
    StaticEnrichment, TableError,
};

const ROWS: [&str; 4] = [
    include_str!("fixtures/a1_001_bulbasaur.html"),
    include_str!("fixtures/a1_004_venusaur_ex.html"),
    include_str!("fixtures/a1_007_butterfree.html"),
    include_str!("fixtures/a1_216_helix_fossil.html"),
];

fn page(extra_rows: &str) -> String {
    let mut html = s!(r#"<html><body><h2>All cards</h2>
        <table class="a-table table--fixed flexible-cell"><tbody>
        <tr><th>✓</th><th>No.</th><th>Card</th><th>Rarity</th><th>Pack</th><th>Type</th><th>HP</th><th>Stage</th><th>Points</th><th>Details</th><th>How to get</th></tr>"#);
    for row in ROWS {
        html.push_str(row);
    }
    html.push_str(extra_rows);
    html.push_str("</tbody></table></body></html>");
    html
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("tcg_e2e_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn batch_skips_malformed_rows_and_keeps_order() {
    let html = page(r#"<tr><td class="center">broken</td><td>A1 999</td></tr>"#);
    let mut opts = ExtractOptions::default();
    for workers in [1, 3] {
        let mut tally = Tally::default();
        opts.set_workers(workers).unwrap();
        let batch = extract_table(&html, &opts, &NoEnrichment, Some(&mut tally)).unwrap();
        let numbers: Vec<&str> = batch.records.iter().map(|r| r.get(Field::Number)).collect();
        assert_eq!(numbers, ["A1 001", "A1 004", "A1 007", "A1 216"]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].0, 4);
        assert_eq!((tally.done, tally.failed), (4, 1));
    }
}

#[test]
fn table_not_found_is_an_error() {
    let err = extract_table("<table class=\"other\"></table>", &ExtractOptions::default(), &NoEnrichment, None)
        .unwrap_err();
    assert!(matches!(err, TableError::NotFound { .. }));
}

#[test]
fn csv_has_fixed_header_and_one_line_per_card() {
    let batch = extract_table(&page(""), &ExtractOptions::default(), &NoEnrichment, None).unwrap();
    let out = to_export_string(&batch.records, ',', true);
    let mut lines = out.lines();

    assert_eq!(lines.next().unwrap(), headers().join(","));
    assert_eq!(
        headers().join(","),
        "number,name,rarity,stage,HP,type,weakness,retreat_cost,generation,illustrator,\
         pack_name,pack_points,ability_name,ability_effect,move1_name,move1_cost,move1_damage,\
         move1_effect,move2_name,move2_cost,move2_damage,move2_effect,image,url"
    );
    let bulbasaur = lines.next().unwrap();
    assert!(bulbasaur.starts_with("A1 001,Bulbasaur,◇,Basic,70,Grass,N/A,1,N/A,N/A,Genetic Apex (A1) Mewtwo,35,"));
    // Helix Fossil's rules text has commas, so it is quoted.
    let helix = lines.nth(2).unwrap();
    assert!(helix.contains("\"Play this card as if it were a 40-HP Basic Colorless Pokemon. At any time"));
    assert!(lines.next().is_none());
}

#[test]
fn enrichment_fills_supplementary_columns() {
    let mut enrich = StaticEnrichment::new();
    enrich.insert("A1 004", Enrichment {
        generation: Some(s!("1")),
        illustrator: Some(s!("PLANETA Mochizuki")),
        weakness: Some(s!("Fire")),
    });
    let batch = extract_table(&page(""), &ExtractOptions::default(), &enrich, None).unwrap();
    let venusaur = batch.find("A1 004").unwrap();
    assert_eq!(venusaur.get(Field::Illustrator), "PLANETA Mochizuki");
    assert_eq!(venusaur.get(Field::Weakness), "Fire");
    assert_eq!(venusaur.get(Field::Move2Name), "Giant Bloom");
    assert_eq!(batch.find("A1 001").unwrap().get(Field::Illustrator), "N/A");
}

#[test]
fn tsv_file_export() {
    let dir = tmp_dir("tsv");
    let mut opts = AppOptions::default();
    opts.export.format = ExportFormat::Tsv;
    opts.export.set_path(&format!("{}/", dir.join("out").display()));

    let batch = extract_table(&page(""), &opts.extract, &NoEnrichment, None).unwrap();
    let path = write_export(&opts.export, &batch.records).unwrap();
    assert!(path.to_string_lossy().ends_with("full.tsv"));

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 5);
    let butterfree: Vec<&str> = text.lines().nth(3).unwrap().split('\t').collect();
    assert_eq!(butterfree.len(), 24);
    assert_eq!(butterfree[12], "Powder Heal");
    assert_eq!(butterfree[18], "Gust");
}

#[test]
fn debug_lookup_as_json() {
    let html = page("");
    let rec = find_card(&html, "A1 007", &ExtractOptions::default(), &NoEnrichment)
        .unwrap()
        .unwrap();
    let json = serde_json::to_string_pretty(&rec).unwrap();
    assert!(json.contains("\"ability_name\": \"Powder Heal\""));
    assert!(json.find("\"number\"").unwrap() < json.find("\"url\"").unwrap());
}

#[test]
fn audit_lists_gaps() {
    let batch = extract_table(&page(""), &ExtractOptions::default(), &NoEnrichment, None).unwrap();
    let missing = missing_card_ids(batch.records.iter().map(|r| r.get(Field::Number)), &[("A1", 8)]);
    assert_eq!(missing["A1"], ["A1 002", "A1 003", "A1 005", "A1 006", "A1 008"]);
}
