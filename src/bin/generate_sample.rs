use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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
}

/// (iso_code, continent, location, population in millions)
const ENTITIES: [(&str, &str, &str, f64); 9] = [
    ("KEN", "Africa", "Kenya", 54.0),
    ("USA", "North America", "United States", 332.0),
    ("IND", "Asia", "India", 1400.0),
    ("BRA", "South America", "Brazil", 214.0),
    ("DEU", "Europe", "Germany", 83.0),
    ("PER", "South America", "Peru", 33.0),
    ("TCD", "Africa", "Chad", 17.0),
    ("OWID_WRL", "", "World", 7900.0),
    ("OWID_AFR", "", "Africa", 1400.0),
];

const DAYS: i64 = 400;

fn cell(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.1}")).unwrap_or_default()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2020, 3, 1).context("invalid start date")?;
    let vaccination_start: i64 = 290;

    let output_path = "owid-covid-data.csv";
    let mut wtr = csv::Writer::from_path(output_path).context("creating output file")?;
    wtr.write_record([
        "iso_code",
        "continent",
        "location",
        "date",
        "total_cases",
        "new_cases",
        "total_deaths",
        "new_deaths",
        "total_vaccinations",
        "population",
    ])?;

    let mut rows = 0usize;
    for &(code, continent, location, population) in &ENTITIES {
        let growth = 0.5 + rng.next_f64();
        let fatality = 0.005 + 0.02 * rng.next_f64();
        // Some countries report their first case late: zero-case rows give an
        // undefined death rate.
        let first_case = (rng.next_f64() * 40.0) as i64;

        let mut total_cases = 0.0;
        let mut total_deaths = 0.0;
        let mut total_vax = 0.0;

        for day in 0..DAYS {
            let date = first_day + Duration::days(day);

            let new_cases = if day < first_case {
                0.0
            } else {
                let wave = 1.0 + (day as f64 / 45.0).sin().abs() * 3.0;
                (population * growth * wave * (0.5 + rng.next_f64())).round()
            };
            let new_deaths = (new_cases * fatality).round();
            total_cases += new_cases;
            total_deaths += new_deaths;

            let vax = if day >= vaccination_start {
                total_vax += (population * 2_000.0 * rng.next_f64()).round();
                Some(total_vax)
            } else {
                None
            };

            // Occasional reporting gaps.
            let reported = rng.next_f64() > 0.03;
            let (tc, nc, td, nd) = if reported {
                (Some(total_cases), Some(new_cases), Some(total_deaths), Some(new_deaths))
            } else {
                (None, None, None, None)
            };

            wtr.write_record([
                code.to_string(),
                continent.to_string(),
                location.to_string(),
                date.format("%Y-%m-%d").to_string(),
                cell(tc),
                cell(nc),
                cell(td),
                cell(nd),
                cell(vax),
                format!("{}", population * 1_000_000.0),
            ])?;
            rows += 1;
        }
    }
    wtr.flush()?;

    println!(
        "Wrote {rows} rows for {} entities ({DAYS} days each) to {output_path}",
        ENTITIES.len()
    );
    Ok(())
}
