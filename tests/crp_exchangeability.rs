use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use skein::stats::{ColumnMetadata, StatType};
use skein::{Column, ColumnConfig, Datum};

const N_TRIALS: usize = 4_000;

// Stirling numbers of the first kind over 4!: the CRP(1) probability of
// seating four customers at 1, 2, 3, or 4 tables.
const K_PROBS: [f64; 4] = [6.0 / 24.0, 11.0 / 24.0, 6.0 / 24.0, 1.0 / 24.0];

fn k_frequencies(xs: &[bool], seed: u64) -> [f64; 4] {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let mut hist = [0_usize; 4];

    for _ in 0..N_TRIALS {
        let mut column = Column::new(
            "x",
            StatType::Bernoulli,
            ColumnMetadata::default(),
            &ColumnConfig::new().alpha(1.0),
        )
        .unwrap();
        for &x in xs {
            column.incorporate(&Datum::Binary(x), &mut rng).unwrap();
        }
        hist[column.k() - 1] += 1;
    }

    let mut freqs = [0.0; 4];
    for (freq, ct) in freqs.iter_mut().zip(hist.iter()) {
        *freq = *ct as f64 / N_TRIALS as f64;
    }
    freqs
}

fn assert_close_to_crp(freqs: [f64; 4]) {
    for (k, (freq, p)) in freqs.iter().zip(K_PROBS.iter()).enumerate() {
        assert!(
            (freq - p).abs() < 0.03,
            "P(K={}) = {} but expected {}",
            k + 1,
            freq,
            p
        );
    }
}

#[test]
fn category_count_follows_crp_prior() {
    assert_close_to_crp(k_frequencies(&[true, true, false, false], 1337));
}

#[test]
fn category_count_does_not_depend_on_order() {
    assert_close_to_crp(k_frequencies(&[false, true, false, true], 1337));
    assert_close_to_crp(k_frequencies(&[true, false, false, true], 7));
}

#[test]
fn partition_prior_matches_incorporation_probabilities() {
    let mut rng = Xoshiro256Plus::seed_from_u64(1337);
    let mut column = Column::new(
        "x",
        StatType::Count,
        ColumnMetadata::default(),
        &ColumnConfig::new().alpha(1.5),
    )
    .unwrap();

    for x in 0..12_u32 {
        column.incorporate(&Datum::Count(x), &mut rng).unwrap();
    }

    let counts: Vec<usize> = column.category_counts().into_values().collect();
    let expected = skein::stats::lcrp(column.n(), &counts, 1.5);
    assert!((column.ln_partition_prior() - expected).abs() < 1E-10);
    assert!(column.ln_partition_prior() < 0.0);
}
