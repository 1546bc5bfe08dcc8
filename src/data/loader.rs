use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use serde_json::{Map, Value as JsonValue};

use super::model::{Catalog, PriceRecord};

// Column names of the price file. Matching is case-sensitive.
pub const COL_PRODUCT: &str = "Produto";
pub const COL_BRAND: &str = "Marca";
pub const COL_UNIT: &str = "Unidade";
pub const COL_PRICE: &str = "Preco";
pub const COL_PLACE: &str = "Local";
pub const COL_CITY: &str = "Cidade";
pub const COL_STATE: &str = "Estado";

/// Why a single row was left out of the catalog.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RowError {
    #[error("price '{0}' is not a number")]
    NotANumber(String),
    #[error("price {0} is negative or not finite")]
    OutOfRange(f64),
    #[error("row is not a JSON object")]
    NotAnObject,
    #[error("unreadable row: {0}")]
    Malformed(String),
}

/// Counters reported after each load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub kept: usize,
    pub discarded: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the price catalog from a file.  Dispatch by extension.
///
/// * `.json` – `[{ "Produto": "...", "Preco": 4.5, ... }, ...]`
/// * anything else is read as CSV with a header row.
///
/// A missing file is not an error: it yields an empty catalog.  Rows whose
/// price cannot be parsed are dropped and loading carries on.
pub fn load_file(path: &Path) -> Result<Catalog> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} not found, starting with an empty catalog", path.display());
            return Ok(Catalog::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("opening {}", path.display()));
        }
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (catalog, stats) = match ext.as_str() {
        "json" => load_json(file),
        _ => load_csv(file),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records from {} ({} rows discarded)",
        stats.kept,
        path.display(),
        stats.discarded
    );
    Ok(catalog)
}

/// Parse a locale-formatted price: surrounding whitespace is ignored and a
/// comma decimal separator is accepted.
pub fn parse_price(raw: &str) -> Result<f64, RowError> {
    let normalized = raw.trim().replace(',', ".");
    let price: f64 = normalized
        .parse()
        .map_err(|_| RowError::NotANumber(raw.to_string()))?;
    check_range(price)
}

/// Finite and non-negative; `-0` is stored as `0`.
fn check_range(price: f64) -> Result<f64, RowError> {
    if !price.is_finite() || price < 0.0 {
        return Err(RowError::OutOfRange(price));
    }
    Ok(if price == 0.0 { 0.0 } else { price })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header positions of the known columns; `None` when a column is absent.
#[derive(Debug, Default)]
struct Columns {
    product: Option<usize>,
    brand: Option<usize>,
    unit: Option<usize>,
    price: Option<usize>,
    place: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Columns {
            product: find(COL_PRODUCT),
            brand: find(COL_BRAND),
            unit: find(COL_UNIT),
            price: find(COL_PRICE),
            place: find(COL_PLACE),
            city: find(COL_CITY),
            state: find(COL_STATE),
            width: headers.len(),
        }
    }

    fn to_record(&self, row: &StringRecord) -> Result<PriceRecord, RowError> {
        let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
        self.merge_split_decimal(&mut fields);

        let get = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let price = parse_price(&get(self.price))?;
        Ok(PriceRecord {
            product: get(self.product),
            brand: get(self.brand),
            unit: get(self.unit),
            price,
            place: get(self.place),
            city: get(self.city),
            state: get(self.state),
        })
    }

    /// An unquoted decimal comma (`...,3,50,...`) spills the price into an
    /// extra field.  Rejoin it when the row is exactly one field too long and
    /// both halves are plain digit runs.
    fn merge_split_decimal(&self, fields: &mut Vec<String>) {
        let Some(p) = self.price else {
            return;
        };
        if fields.len() != self.width + 1 || p + 1 >= fields.len() {
            return;
        }
        let is_digits = |s: &str| {
            let s = s.trim();
            !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
        };
        if is_digits(&fields[p]) && is_digits(&fields[p + 1]) {
            let cents = fields.remove(p + 1);
            fields[p] = format!("{}.{}", fields[p].trim(), cents.trim());
        }
    }
}

/// CSV layout: header row with (a subset of) the columns
/// `Produto, Marca, Unidade, Preco, Local, Cidade, Estado`.
/// Columns that are missing read as empty strings.  Header names must match
/// exactly; only the price field is trimmed, other fields are kept verbatim.
pub fn load_csv<R: Read>(reader: R) -> Result<(Catalog, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = Columns::from_headers(&headers);

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for (row_no, result) in reader.records().enumerate() {
        let parsed = result
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(|row| columns.to_record(&row));
        match parsed {
            Ok(rec) => {
                records.push(rec);
                stats.kept += 1;
            }
            Err(e) => {
                log::debug!("CSV row {}: {e}, skipping", row_no + 1);
                stats.discarded += 1;
            }
        }
    }

    Ok((Catalog::from_records(records), stats))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Produto": "Rice", "Marca": "Tio", "Preco": "4,50", "Cidade": "Aracaju" },
///   { "Produto": "Beans", "Preco": 5.0 }
/// ]
/// ```
pub fn load_json<R: Read>(mut reader: R) -> Result<(Catalog, LoadStats)> {
    let mut text = String::new();
    reader.read_to_string(&mut text).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut stats = LoadStats::default();

    for (i, row) in rows.iter().enumerate() {
        let parsed = row
            .as_object()
            .ok_or(RowError::NotAnObject)
            .and_then(json_to_record);
        match parsed {
            Ok(rec) => {
                records.push(rec);
                stats.kept += 1;
            }
            Err(e) => {
                log::debug!("JSON row {i}: {e}, skipping");
                stats.discarded += 1;
            }
        }
    }

    Ok((Catalog::from_records(records), stats))
}

fn json_to_record(obj: &Map<String, JsonValue>) -> Result<PriceRecord, RowError> {
    let price = match obj.get(COL_PRICE) {
        Some(JsonValue::Number(n)) => {
            let v = n.as_f64().ok_or_else(|| RowError::NotANumber(n.to_string()))?;
            check_range(v)?
        }
        Some(JsonValue::String(s)) => parse_price(s)?,
        Some(other) => return Err(RowError::NotANumber(other.to_string())),
        None => return Err(RowError::NotANumber(String::new())),
    };
    Ok(PriceRecord {
        product: json_text(obj, COL_PRODUCT),
        brand: json_text(obj, COL_BRAND),
        unit: json_text(obj, COL_UNIT),
        price,
        place: json_text(obj, COL_PLACE),
        city: json_text(obj, COL_CITY),
        state: json_text(obj, COL_STATE),
    })
}

fn json_text(obj: &Map<String, JsonValue>, key: &str) -> String {
    match obj.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    const TEST_INPUT_CSV: &[u8] = b"Produto,Marca,Unidade,Preco,Local,Cidade,Estado
Rice,Tio,1kg,4.50,MarketA,Aracaju,SE
Beans,Kicaldo,1kg,abc,MarketB,Aracaju,SE
Milk,Betania,1l,\"3,20\",MarketA,Aracaju,SE
Coffee,Marata,250g,,MarketC,Lagarto,SE
Oil,Soya,900ml,  7,99 ,MarketB,Itabaiana,SE
Salt,Cisne,1kg,-1.00,MarketA,Aracaju,SE
Flour,Dona Benta,1kg,inf,MarketA,Aracaju,SE
Bread,Padaria,un,0.75,Bakery,Aracaju,SE
";

    fn prices(catalog: &Catalog) -> Vec<f64> {
        catalog.records().iter().map(|r| r.price).collect()
    }

    #[test]
    fn test_malformed_rows_are_dropped_in_order() {
        let (catalog, stats) = load_csv(Cursor::new(TEST_INPUT_CSV)).unwrap();
        let products: Vec<_> = catalog.records().iter().map(|r| r.product.as_str()).collect();
        assert_eq!(products, vec!["Rice", "Milk", "Oil", "Bread"]);
        assert_eq!(prices(&catalog), vec![4.5, 3.2, 7.99, 0.75]);
        assert_eq!(stats, LoadStats { kept: 4, discarded: 4 });
    }

    #[test]
    fn test_unquoted_decimal_comma() {
        let input = b"Produto,Marca,Unidade,Preco,Local,Cidade,Estado
Sugar,BrandX,1kg,3,50,MarketA,Aracaju,SE
";
        let (catalog, _) = load_csv(Cursor::new(&input[..])).unwrap();
        assert_eq!(catalog.len(), 1);
        let rec = &catalog.records()[0];
        assert_eq!(rec.price, 3.50);
        assert_eq!(rec.place, "MarketA");
        assert_eq!(rec.city, "Aracaju");
        assert_eq!(rec.state, "SE");
    }

    #[test]
    fn test_invalid_price_is_excluded() {
        let input = b"Produto,Preco
Sugar,abc
Salt,2
";
        let (catalog, stats) = load_csv(Cursor::new(&input[..])).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].product, "Salt");
        assert_eq!(stats.discarded, 1);
    }

    #[test]
    fn test_missing_columns_read_as_empty() {
        let input = b"Preco,Produto
1.5,Egg
";
        let (catalog, _) = load_csv(Cursor::new(&input[..])).unwrap();
        let rec = &catalog.records()[0];
        assert_eq!(rec.product, "Egg");
        assert_eq!(rec.brand, "");
        assert_eq!(rec.city, "");
        assert_eq!(rec.state, "");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let input = b"Produto,Preco,Local,Cidade,Estado
Egg,1.5
";
        let (catalog, _) = load_csv(Cursor::new(&input[..])).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].place, "");
    }

    #[test]
    fn test_prices_round_trip_with_two_decimals() {
        let (catalog, _) = load_csv(Cursor::new(TEST_INPUT_CSV)).unwrap();
        for rec in catalog.records() {
            let formatted = format!("{:.2}", rec.price);
            let reparsed: f64 = formatted.parse().unwrap();
            assert!((reparsed - rec.price).abs() < 0.005);
        }
    }

    #[test]
    fn test_negative_zero_is_stored_as_zero() {
        let input = b"Produto,Marca,Unidade,Preco,Local
A,a,u,0,L
B,b,u,-0,L
C,c,u,\"-0,00\",L
";
        let (catalog, stats) = load_csv(Cursor::new(&input[..])).unwrap();
        assert_eq!(stats.kept, 3);
        for rec in catalog.records() {
            assert!(rec.price.is_sign_positive());
        }
        assert_eq!(catalog.records()[1].to_string(), "B | b | u | price:0.00 | L");

        let (json, _) = load_json(Cursor::new(&br#"[{"Produto": "D", "Preco": -0.0}]"#[..])).unwrap();
        assert!(json.records()[0].price.is_sign_positive());
    }

    #[test]
    fn test_only_price_is_trimmed() {
        let input = b"Produto,Preco, Cidade
 Rice , 4.50 ,Aracaju
";
        let (catalog, _) = load_csv(Cursor::new(&input[..])).unwrap();
        let rec = &catalog.records()[0];
        assert_eq!(rec.product, " Rice ");
        assert_eq!(rec.price, 4.5);
        // " Cidade" is not the `Cidade` column
        assert_eq!(rec.city, "");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 3,50 "), Ok(3.5));
        assert_eq!(parse_price("10"), Ok(10.0));
        assert_eq!(parse_price("0.00"), Ok(0.0));
        assert!(matches!(parse_price(""), Err(RowError::NotANumber(_))));
        assert!(matches!(parse_price("1,234.50"), Err(RowError::NotANumber(_))));
        assert!(matches!(parse_price("NaN"), Err(RowError::OutOfRange(_))));
        assert!(matches!(parse_price("-2"), Err(RowError::OutOfRange(_))));
        assert!(parse_price("-0").unwrap().is_sign_positive());
    }

    #[test]
    fn test_load_json() {
        let input = br#"[
            {"Produto": "Rice", "Preco": 4.5, "Cidade": "Aracaju", "Estado": "SE"},
            {"Produto": "Beans", "Preco": "5,25", "Marca": null},
            {"Produto": "Broken", "Preco": "x"},
            {"Produto": "NoPrice"},
            42
        ]"#;
        let (catalog, stats) = load_json(Cursor::new(&input[..])).unwrap();
        assert_eq!(prices(&catalog), vec![4.5, 5.25]);
        assert_eq!(catalog.records()[1].brand, "");
        assert_eq!(stats, LoadStats { kept: 2, discarded: 3 });
    }

    #[test]
    fn test_load_json_rejects_non_array() {
        assert!(load_json(Cursor::new(&b"{\"Produto\": 1}"[..])).is_err());
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_file(&dir.path().join("precos.csv")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_file_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("precos.csv");
        File::create(&csv_path)
            .unwrap()
            .write_all(TEST_INPUT_CSV)
            .unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 4);

        let json_path = dir.path().join("precos.json");
        File::create(&json_path)
            .unwrap()
            .write_all(br#"[{"Produto": "Rice", "Preco": 1}]"#)
            .unwrap();
        assert_eq!(load_file(&json_path).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_file_yields_empty_catalog() {
        let (catalog, stats) = load_csv(Cursor::new(&b""[..])).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(stats, LoadStats::default());
    }
}
