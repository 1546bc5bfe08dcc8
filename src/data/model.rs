use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// PriceRecord – one row of the price file
// ---------------------------------------------------------------------------

/// One observed price of a product at a location.
///
/// Only created by the loader, which guarantees `price` is finite and
/// non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub product: String,
    pub brand: String,
    pub unit: String,
    pub price: f64,
    /// Store / market name.
    pub place: String,
    pub city: String,
    pub state: String,
}

impl fmt::Display for PriceRecord {
    /// The shopping-list line used by the report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | price:{} | {}",
            self.product,
            self.brand,
            self.unit,
            format_price(self.price),
            self.place
        )
    }
}

/// Two decimals, always with a dot separator.
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("{price:.2}")
    } else {
        "n/a".to_string()
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded price list
// ---------------------------------------------------------------------------

/// All records of the session, in file order. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PriceRecord>,
    cities: BTreeSet<String>,
    states: BTreeSet<String>,
}

impl Catalog {
    /// Build the location indices from the loaded records.
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let mut cities = BTreeSet::new();
        let mut states = BTreeSet::new();
        for rec in &records {
            if !rec.city.is_empty() {
                cities.insert(rec.city.clone());
            }
            if !rec.state.is_empty() {
                states.insert(rec.state.clone());
            }
        }
        Catalog {
            records,
            cities,
            states,
        }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&PriceRecord> {
        self.records.get(index)
    }

    /// Sorted distinct non-empty city names.
    pub fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    /// Sorted distinct non-empty state names.
    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection – records chosen for export
// ---------------------------------------------------------------------------

/// Catalog indices picked by the user, kept in the order they were chosen.
///
/// A record is identified by its catalog index, so selecting the same row
/// twice never duplicates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    /// Add `index`; returns `false` if it was already selected.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.contains(index) {
            return false;
        }
        self.indices.push(index);
        true
    }

    /// Returns `true` if `index` was selected.
    pub fn remove(&mut self, index: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|&i| i != index);
        self.indices.len() != before
    }

    /// Flip membership; returns the new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.remove(index) {
            false
        } else {
            self.insert(index)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The selected records in selection order. Indices that do not exist in
    /// `catalog` are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a PriceRecord> {
        self.indices.iter().filter_map(|&i| catalog.get(i)).collect()
    }
}

#[cfg(test)]
pub(crate) fn record(product: &str, price: f64, city: &str, state: &str) -> PriceRecord {
    PriceRecord {
        product: product.to_string(),
        brand: String::new(),
        unit: String::new(),
        price,
        place: String::new(),
        city: city.to_string(),
        state: state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_report_line_format() {
        let rec = PriceRecord {
            product: "Sugar".into(),
            brand: "BrandX".into(),
            unit: "1kg".into(),
            price: 3.5,
            place: "MarketA".into(),
            city: "Aracaju".into(),
            state: "SE".into(),
        };
        assert_eq!(rec.to_string(), "Sugar | BrandX | 1kg | price:3.50 | MarketA");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4.5), "4.50");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(-1.255), "-1.25");
        assert_eq!(format_price(1234567.891), "1234567.89");
        assert_eq!(format_price(f64::NAN), "n/a");
        assert_eq!(format_price(f64::INFINITY), "n/a");
    }

    #[test]
    fn test_catalog_location_indices() {
        let catalog = Catalog::from_records(vec![
            record("Rice", 4.5, "Aracaju", "SE"),
            record("Beans", 5.0, "Nossa Senhora", "SE"),
            record("Milk", 3.0, "", ""),
        ]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.cities().iter().collect::<Vec<_>>(),
            vec!["Aracaju", "Nossa Senhora"]
        );
        assert_eq!(catalog.states().len(), 1);
        assert!(Catalog::default().is_empty());
    }

    #[test]
    fn test_selection_has_no_duplicates() {
        let mut sel = Selection::default();
        assert!(sel.insert(2));
        assert!(!sel.insert(2));
        assert!(sel.insert(0));
        assert_eq!(sel.indices(), &[2, 0]);

        assert!(!sel.toggle(2));
        assert!(sel.toggle(1));
        assert_eq!(sel.indices(), &[0, 1]);
        assert!(!sel.remove(7));

        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_selection_resolves_in_selection_order() {
        let catalog = Catalog::from_records(vec![
            record("Rice", 4.5, "Aracaju", "SE"),
            record("Beans", 5.0, "Aracaju", "SE"),
        ]);
        let mut sel = Selection::default();
        sel.insert(1);
        sel.insert(9);
        sel.insert(0);
        let products: Vec<_> = sel.resolve(&catalog).iter().map(|r| r.product.as_str()).collect();
        assert_eq!(products, vec!["Beans", "Rice"]);
    }
}
