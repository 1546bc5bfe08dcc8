use serde::Serialize;

/// One row of `precos.csv`, with the column names the app expects.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Produto")]
    product: &'a str,
    #[serde(rename = "Marca")]
    brand: &'a str,
    #[serde(rename = "Unidade")]
    unit: &'a str,
    #[serde(rename = "Preco")]
    price: String,
    #[serde(rename = "Local")]
    place: &'a str,
    #[serde(rename = "Cidade")]
    city: &'a str,
    #[serde(rename = "Estado")]
    state: &'a str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // (product, brand, unit, base price)
    let products = [
        ("Arroz", "Tio João", "1kg", 5.20),
        ("Feijão", "Kicaldo", "1kg", 7.80),
        ("Açúcar", "União", "1kg", 4.10),
        ("Café", "Maratá", "250g", 9.90),
        ("Leite", "Betânia", "1l", 4.60),
        ("Óleo", "Soya", "900ml", 7.40),
        ("Macarrão", "Vitarella", "500g", 3.90),
        ("Farinha", "Dona Benta", "1kg", 5.50),
    ];
    let stores = [
        ("GBarbosa", "Aracaju", "SE"),
        ("Atacadão", "Aracaju", "SE"),
        ("Mercantil", "Nossa Senhora do Socorro", "SE"),
        ("Assaí", "Lagarto", "SE"),
        ("Hiper Bompreço", "Salvador", "BA"),
    ];

    let output_path = "precos.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    let mut rows = 0usize;

    for &(product, brand, unit, base) in &products {
        for &(place, city, state) in &stores {
            let price = base * rng.range(0.85, 1.20);
            // Half the rows use the Brazilian decimal comma.
            let price = if rng.next_u64() % 2 == 0 {
                format!("{price:.2}").replace('.', ",")
            } else {
                format!("{price:.2}")
            };
            writer.serialize(Row {
                product,
                brand,
                unit,
                price,
                place,
                city,
                state,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    println!("Wrote {rows} price records to {output_path}");
    Ok(())
}
