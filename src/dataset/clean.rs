use super::types::{
    CellValue, CleanedDataset, CleaningReport, HOTEL_CODE, HOTEL_NAME, HotelRecord, HotelSummary,
    RawTable,
};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Hotel names containing this (any case) are fixture/test properties.
const TEST_MARKER: &str = "test";

struct RawRow {
    row: usize,
    code: String,
    name: String,
    raw_score: f64,
    values: Vec<CellValue>,
}

struct ScoredRow {
    row: usize,
    code: String,
    name: String,
    score: u8,
    values: Vec<CellValue>,
}

/// Turn a raw table into the cleaned dataset.
///
/// 1. Check structure (key columns, cell counts, cell types)
/// 2. Drop rows without a text name, then test properties
/// 3. Sort by hotel code (stable)
/// 4. Scale the score fraction to an integer percentage (truncating)
/// 5. Keep only the last row per hotel name, in code order
/// 6. Reject hotel codes that still appear more than once
/// 7. Derive chain code, chain name and navigation keys
///
/// `numeric_columns` names extra attribute columns carried into the reduced
/// projection for per-chain averaging.
pub fn clean(
    table: RawTable,
    catalog: &Catalog,
    numeric_columns: &[String],
) -> Result<CleanedDataset> {
    let RawTable { columns, rows } = table;
    if columns.len() < 2 {
        return Err(Error::schema(format!(
            "expected attribute columns followed by a score column, got {} column(s)",
            columns.len()
        )));
    }
    let attributes = columns[..columns.len() - 1].to_vec();
    let code_idx = column_index(&attributes, HOTEL_CODE)?;
    let name_idx = column_index(&attributes, HOTEL_NAME)?;
    let numeric_idx = numeric_columns
        .iter()
        .map(|c| column_index(&attributes, c).map(|i| (c.clone(), i)))
        .collect::<Result<Vec<_>>>()?;

    let rows_read = rows.len();
    let mut staged = Vec::with_capacity(rows_read);
    let mut unnamed_dropped = 0;
    for (row, cells) in rows.into_iter().enumerate() {
        match stage_row(row, cells, columns.len(), code_idx, name_idx)? {
            Some(r) => staged.push(r),
            None => unnamed_dropped += 1,
        }
    }

    staged.retain(|r| !is_test_entry(&r.name));
    let test_entries_dropped = rows_read - unnamed_dropped - staged.len();

    staged.sort_by(|a, b| a.code.cmp(&b.code));

    let scored = staged
        .into_iter()
        .map(|r| {
            let score = normalize_score(r.raw_score).ok_or_else(|| {
                Error::malformed(r.row, format!("score {} is outside [0, 1]", r.raw_score))
            })?;
            Ok(ScoredRow {
                row: r.row,
                code: r.code,
                name: r.name,
                score,
                values: r.values,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (kept, duplicates_dropped) = dedup_keep_last(scored);
    if duplicates_dropped > 0 {
        debug!(duplicates_dropped, "hotel names were not unique, kept last by code");
    }

    let mut records: Vec<HotelRecord> = Vec::with_capacity(kept.len());
    let mut projection = Vec::with_capacity(kept.len());
    for row in kept {
        if records.last().is_some_and(|prev| prev.hotel_code == row.code) {
            return Err(Error::malformed(
                row.row,
                format!("hotel code {:?} appears more than once", row.code),
            ));
        }
        let chain_code = chain_code_of(&row.code)
            .ok_or_else(|| {
                Error::malformed(
                    row.row,
                    format!("hotel code {:?} is too short to carry a chain code", row.code),
                )
            })?
            .to_string();
        let chain_name = catalog.chain_display_name(&chain_code).to_string();
        let chain_url = catalog.chain_url(&chain_code);
        let hotel_url = catalog.hotel_url(&row.code);

        let numeric: BTreeMap<String, f64> = numeric_idx
            .iter()
            .filter_map(|(name, i)| row.values[*i].as_f64().map(|v| (name.clone(), v)))
            .collect();

        projection.push(HotelSummary {
            hotel_code: row.code.clone(),
            hotel_name: row.name.clone(),
            chain_code: chain_code.clone(),
            chain_name: chain_name.clone(),
            score: row.score,
            chain_url: chain_url.clone(),
            hotel_url: hotel_url.clone(),
            numeric,
        });
        records.push(HotelRecord {
            hotel_code: row.code,
            hotel_name: row.name,
            chain_code,
            chain_name,
            score: row.score,
            chain_url,
            hotel_url,
            values: row.values,
        });
    }

    let report = CleaningReport {
        rows_read,
        unnamed_dropped,
        test_entries_dropped,
        duplicates_dropped,
    };
    info!(
        rows_read,
        unnamed_dropped,
        test_entries_dropped,
        duplicates_dropped,
        total_hotels = records.len(),
        "cleaning complete"
    );

    Ok(CleanedDataset {
        attributes,
        records,
        projection,
        report,
    })
}

fn column_index(attributes: &[String], name: &str) -> Result<usize> {
    attributes
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| Error::schema(format!("missing attribute column {name:?}")))
}

/// `None` when the row has no text name and is skipped.
fn stage_row(
    row: usize,
    mut cells: Vec<CellValue>,
    width: usize,
    code_idx: usize,
    name_idx: usize,
) -> Result<Option<RawRow>> {
    if cells.len() != width {
        return Err(Error::malformed(
            row,
            format!("expected {width} cells, found {}", cells.len()),
        ));
    }
    let Some(name) = cells[name_idx].as_text().map(str::to_string) else {
        debug!(row, "hotel name is not text, row skipped");
        return Ok(None);
    };
    let score_cell = cells
        .pop()
        .ok_or_else(|| Error::malformed(row, "missing score cell"))?;
    let raw_score = score_cell
        .as_f64()
        .ok_or_else(|| Error::malformed(row, format!("score cell is not numeric: {score_cell:?}")))?;
    let code = cells[code_idx]
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| {
            Error::malformed(row, format!("{HOTEL_CODE} is not text: {:?}", cells[code_idx]))
        })?;
    Ok(Some(RawRow {
        row,
        code,
        name,
        raw_score,
        values: cells,
    }))
}

fn is_test_entry(hotel_name: &str) -> bool {
    hotel_name.to_lowercase().contains(TEST_MARKER)
}

/// `trunc(raw * 100)`, or `None` when that falls outside 0..=100.
pub fn normalize_score(raw: f64) -> Option<u8> {
    let scaled = (raw * 100.0).trunc();
    if scaled.is_finite() && (0.0..=100.0).contains(&scaled) {
        Some(scaled as u8)
    } else {
        None
    }
}

/// First two characters of a hotel code.
pub fn chain_code_of(hotel_code: &str) -> Option<&str> {
    let mut chars = hotel_code.char_indices();
    match (chars.next(), chars.next()) {
        (Some(_), Some((i, c))) => Some(&hotel_code[..i + c.len_utf8()]),
        _ => None,
    }
}

fn dedup_keep_last(rows: Vec<ScoredRow>) -> (Vec<ScoredRow>, usize) {
    let mut last: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    for (i, r) in rows.iter().enumerate() {
        last.insert(r.name.clone(), i);
    }
    let before = rows.len();
    let kept: Vec<ScoredRow> = rows
        .into_iter()
        .enumerate()
        .filter(|(i, r)| last.get(&r.name) == Some(i))
        .map(|(_, r)| r)
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<(&str, &str, f64)>) -> RawTable {
        RawTable {
            columns: vec![
                "HotelCode".into(),
                "HotelName".into(),
                "Room_Description".into(),
                "Score".into(),
            ],
            rows: rows
                .into_iter()
                .map(|(code, name, score)| {
                    vec![
                        CellValue::from(code),
                        CellValue::from(name),
                        CellValue::from("Double room"),
                        CellValue::Float(score),
                    ]
                })
                .collect(),
        }
    }

    fn run(rows: Vec<(&str, &str, f64)>) -> Result<CleanedDataset> {
        clean(table(rows), &Catalog::default(), &[])
    }

    #[test]
    fn duplicate_names_keep_last_by_code() {
        let ds = run(vec![
            ("HLAAA", "Hilton AAA", 0.8),
            ("HLAAB", "Hilton AAA", 0.9),
        ])
        .unwrap();
        assert_eq!(ds.total_hotels(), 1);
        let rec = &ds.records()[0];
        assert_eq!(rec.hotel_name, "Hilton AAA");
        assert_eq!(rec.hotel_code, "HLAAB");
        assert_eq!(rec.score, 90);
        assert_eq!(ds.report().duplicates_dropped, 1);
    }

    #[test]
    fn dedup_ignores_score_and_input_order() {
        // Input order is reversed and the later code has the lower score.
        let ds = run(vec![
            ("MCZ99", "Marriott Central", 0.1),
            ("MCA00", "Marriott Central", 0.95),
        ])
        .unwrap();
        assert_eq!(ds.total_hotels(), 1);
        assert_eq!(ds.records()[0].hotel_code, "MCZ99");
        assert_eq!(ds.records()[0].score, 10);
    }

    #[test]
    fn test_properties_are_dropped_in_any_case() {
        let ds = run(vec![
            ("HLAAA", "Hilton TEST", 0.5),
            ("HLAAB", "hilton test two", 0.5),
            ("HLAAC", "Contested Plaza", 0.5),
            ("HLAAD", "Hilton Real", 0.5),
        ])
        .unwrap();
        let names: Vec<&str> = ds.records().iter().map(|r| r.hotel_name.as_str()).collect();
        assert_eq!(names, vec!["Hilton Real"]);
        assert_eq!(ds.report().test_entries_dropped, 3);
    }

    #[test]
    fn records_are_sorted_by_code() {
        let ds = run(vec![
            ("SI100", "Sheraton Bay", 0.5),
            ("HL001", "Hilton One", 0.5),
            ("MC050", "Marriott Fifty", 0.5),
        ])
        .unwrap();
        let codes: Vec<&str> = ds.records().iter().map(|r| r.hotel_code.as_str()).collect();
        assert_eq!(codes, vec!["HL001", "MC050", "SI100"]);
        let projected: Vec<&str> = ds.projection().iter().map(|r| r.hotel_code.as_str()).collect();
        assert_eq!(projected, codes);
    }

    #[test]
    fn score_is_truncated_not_rounded() {
        assert_eq!(normalize_score(0.9), Some(90));
        assert_eq!(normalize_score(0.291), Some(29));
        assert_eq!(normalize_score(0.999), Some(99));
        assert_eq!(normalize_score(1.0), Some(100));
        assert_eq!(normalize_score(0.0), Some(0));
    }

    #[test]
    fn score_out_of_range_is_rejected() {
        assert_eq!(normalize_score(1.5), None);
        assert_eq!(normalize_score(-0.5), None);
        assert_eq!(normalize_score(f64::NAN), None);
        let err = run(vec![("HLAAA", "Hilton", 2.0)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { row: 0, .. }));
    }

    #[test]
    fn chain_fields_are_derived() {
        let ds = run(vec![("HLAAA", "Hilton", 0.5), ("ZZ001", "Unknown Lodge", 0.5)]).unwrap();
        let hilton = ds.find("HLAAA").unwrap();
        assert_eq!(hilton.chain_code, "HL");
        assert_eq!(hilton.chain_name, "Hilton");
        assert_eq!(hilton.chain_url, "/chain?ChainCode=HL");
        assert_eq!(hilton.hotel_url, "/hotel?HotelCode=HLAAA");
        let lodge = ds.find("ZZ001").unwrap();
        assert_eq!(lodge.chain_name, "ZZ");
    }

    #[test]
    fn short_hotel_code_is_malformed() {
        let err = run(vec![("HLAAA", "Hilton", 0.5), ("H", "Tiny", 0.5)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { row: 1, .. }));
    }

    #[test]
    fn chain_code_respects_char_boundaries() {
        assert_eq!(chain_code_of("ÉCabc"), Some("ÉC"));
        assert_eq!(chain_code_of("AB"), Some("AB"));
        assert_eq!(chain_code_of("A"), None);
        assert_eq!(chain_code_of(""), None);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let ds = run(vec![]).unwrap();
        assert_eq!(ds.total_hotels(), 0);
        assert!(ds.projection().is_empty());
        assert_eq!(ds.attributes().len(), 3);
    }

    #[test]
    fn repeated_code_with_different_names_is_malformed() {
        let err = run(vec![("HLAAA", "Hilton A", 0.5), ("HLAAA", "Hilton Other", 0.6)])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { row: 1, .. }), "{err}");
    }

    #[test]
    fn repeated_code_with_same_name_collapses() {
        let ds = run(vec![("HLAAA", "Hilton A", 0.5), ("HLAAA", "Hilton A", 0.6)]).unwrap();
        assert_eq!(ds.total_hotels(), 1);
        assert_eq!(ds.find("HLAAA").unwrap().score, 60);
    }

    #[test]
    fn rows_without_text_name_are_skipped() {
        let mut t = table(vec![("HLAAA", "Hilton A", 0.5)]);
        t.rows.push(vec![
            CellValue::from("HLAAB"),
            CellValue::Null,
            CellValue::from("Double room"),
            CellValue::Float(0.7),
        ]);
        t.rows.push(vec![
            CellValue::from("HLAAC"),
            CellValue::Integer(7),
            CellValue::from("Double room"),
            CellValue::Float(0.7),
        ]);
        let ds = clean(t, &Catalog::default(), &[]).unwrap();
        assert_eq!(ds.total_hotels(), 1);
        assert!(ds.find("HLAAB").is_none());
        let report = ds.report();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.unnamed_dropped, 2);
        assert_eq!(report.test_entries_dropped, 0);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let mut t = table(vec![("HLAAA", "Hilton", 0.5)]);
        t.rows.push(vec![CellValue::from("HLAAB"), CellValue::from("Short")]);
        let err = clean(t, &Catalog::default(), &[]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { row: 1, .. }));
    }

    #[test]
    fn missing_key_column_is_a_schema_error() {
        let t = RawTable {
            columns: vec!["HotelCode".into(), "Score".into()],
            rows: vec![],
        };
        assert!(matches!(
            clean(t, &Catalog::default(), &[]),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn numeric_columns_reach_the_projection() {
        let t = RawTable {
            columns: vec![
                "HotelCode".into(),
                "HotelName".into(),
                "RoomCount".into(),
                "Score".into(),
            ],
            rows: vec![
                vec!["HLAAA".into(), "Hilton A".into(), CellValue::Integer(120), CellValue::Float(0.5)],
                vec!["HLAAB".into(), "Hilton B".into(), "NONE".into(), CellValue::Float(0.5)],
            ],
        };
        let ds = clean(t, &Catalog::default(), &["RoomCount".to_string()]).unwrap();
        assert_eq!(ds.projection()[0].numeric.get("RoomCount"), Some(&120.0));
        assert!(ds.projection()[1].numeric.is_empty());
    }
}
