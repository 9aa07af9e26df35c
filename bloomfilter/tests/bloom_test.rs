// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bloomfilter::bloom::BloomFilter;
use bloomfilter::bloom::BloomFilterBuilder;
use bloomfilter::bloom::DEFAULT_FALSE_POSITIVE_RATE;
use bloomfilter::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::ge;
use googletest::prelude::le;
use googletest::prelude::near;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(expected_elements: u64, false_positive_rate: f64, seed: u64) -> BloomFilter {
    BloomFilterBuilder::with_accuracy(expected_elements)
        .false_positive_rate(false_positive_rate)
        .build_with_rng(&mut StdRng::seed_from_u64(seed))
        .unwrap()
}

#[test]
fn test_parameter_suggestions() {
    let size = BloomFilterBuilder::suggest_size(10_000, 1e-7).unwrap();
    let reference = (10_000.0 * -(1e-7f64).ln() / std::f64::consts::LN_2.powi(2)).ceil();
    assert_that!(size, eq(reference as u64));
    assert_that!(size, eq(335_478));
    assert_that!(BloomFilterBuilder::suggest_hash_rounds(10_000, size), eq(24));

    assert_that!(BloomFilterBuilder::suggest_size(1000, 0.01).unwrap(), eq(9586));
    assert_that!(BloomFilterBuilder::suggest_hash_rounds(1000, 9586), eq(7));
}

#[test]
fn test_default_false_positive_rate() {
    assert_that!(DEFAULT_FALSE_POSITIVE_RATE, eq(1e-7));
    let filter = BloomFilter::with_expected_elements(10_000).unwrap();
    assert_that!(filter.size(), eq(335_478));
    assert_that!(filter.hash_rounds(), eq(24));
}

#[test]
fn test_empty_filter() {
    let filter = seeded(1000, 0.01, 1);
    assert!(filter.is_empty());
    assert_that!(filter.saturation(), eq(0.0));
    assert_that!(filter.bits_used(), eq(0));
    for i in 0..1000 {
        assert!(!filter.contains(&format!("key-{i}")));
    }
}

#[test]
fn test_no_false_negatives() {
    let mut filter = seeded(5000, 0.001, 2);
    for i in 0..5000 {
        filter.add(&format!("item-{i}"));
    }
    // more keys than the filter was sized for
    for i in 0..5000 {
        filter.add(&i.to_string());
    }

    for i in 0..5000 {
        assert!(filter.contains(&format!("item-{i}")), "item-{i}");
        assert!(filter.contains(&i.to_string()), "{i}");
    }
}

#[test]
fn test_saturation_is_monotonic() {
    let mut filter = seeded(2000, 0.01, 3);
    let mut last = filter.saturation();
    for i in 0..4000 {
        filter.add(&format!("{i}"));
        let saturation = filter.saturation();
        assert_that!(saturation, ge(last));
        assert_that!(saturation, le(1.0));
        last = saturation;
    }
    assert_that!(last, ge(0.5));
}

#[test]
fn test_saturation_at_capacity() {
    let n = 10_000u32;
    let mut filter = seeded(u64::from(n), 0.01, 4);
    for i in 0..n {
        filter.add(&i.to_le_bytes());
    }

    // expected fill after n keys: 1 - e^(-k * n / m)
    let k = f64::from(filter.effective_hash_rounds());
    let m = filter.size() as f64;
    let expected = 1.0 - (-k * f64::from(n) / m).exp();
    assert_that!(filter.saturation(), near(expected, 0.01));
    assert_that!(filter.saturation(), near(0.5, 0.1));
}

#[test]
fn test_false_positive_rate() {
    let n = 10_000;
    let p = 0.01;
    for seed in 0..3 {
        let mut filter = seeded(n, p, seed);
        for i in 0..n {
            filter.add(&format!("present-{i}"));
        }

        let trials = 100_000;
        let false_positives = (0..trials)
            .filter(|i| filter.contains(&format!("absent-{i}")))
            .count();
        let observed = false_positives as f64 / trials as f64;

        assert_that!(observed, ge(p / 10.0));
        assert_that!(observed, le(p * 10.0));
        assert_that!(filter.estimated_fpp(), near(p, p));
    }
}

#[test]
fn test_queries_are_deterministic() {
    let mut filter = seeded(100, 0.1, 5);
    filter.extend((0..100).map(|i| format!("k{i}")));

    for i in 0..500 {
        let key = format!("q{i}");
        let first = filter.contains(&key);
        let second = filter.contains(&key);
        assert_that!(first, eq(second));
        assert_eq!(filter.hashes(&key), filter.hashes(&key));
    }
}

#[test]
fn test_seeds() {
    let filter = seeded(10_000, 1e-7, 6);
    assert_that!(filter.seeds().len(), eq(12));
    for seed in filter.seeds() {
        assert_that!(seed.len(), eq(32));
        assert!(seed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    // the same rng seed reproduces the same filter seeds
    let again = seeded(10_000, 1e-7, 6);
    assert_that!(again.seeds(), eq(filter.seeds()));

    // seeds from the operating system differ between filters
    let a = BloomFilter::new(100, 0.01).unwrap();
    let b = BloomFilter::new(100, 0.01).unwrap();
    assert_ne!(a.seeds(), b.seeds());
}

#[test]
fn test_hash_count_covers_requested_rounds() {
    for (n, p) in [(1000, 0.01), (10_000, 1e-7), (10, 0.5), (1, 0.9)] {
        let filter = BloomFilter::new(n, p).unwrap();
        let rounds = filter.effective_hash_rounds();
        assert_that!(rounds, ge(filter.hash_rounds()));
        assert_that!(rounds, le(filter.hash_rounds() + 1));
        assert_that!(rounds % 2, eq(0));
        assert_that!(filter.hashes("key").len(), eq(rounds as usize));
    }
}

#[test]
fn test_invalid_parameters() {
    for (n, p) in [
        (0, 1e-7),
        (100, 1.0),
        (100, 0.0),
        (100, -1.0),
        (100, 2.0),
        (100, f64::NAN),
        (100, f64::INFINITY),
    ] {
        let err = BloomFilter::new(n, p).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::InvalidParameter));
    }

    let err = BloomFilter::with_expected_elements(0).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidParameter));
    assert_that!(err.to_string().as_str(), eq(
        "InvalidParameter, context: { expected_elements: 0 } => expected_elements must be in [1, u64::MAX]"
    ));
}

#[test]
fn test_byte_size() {
    assert_that!(BloomFilterBuilder::with_size(1, 1).build().unwrap().byte_size(), eq(1));
    assert_that!(BloomFilterBuilder::with_size(64, 1).build().unwrap().byte_size(), eq(8));
    assert_that!(BloomFilterBuilder::with_size(65, 1).build().unwrap().byte_size(), eq(9));
}

#[test]
fn test_single_bit_filter() {
    let mut filter = BloomFilterBuilder::with_size(1, 1).build().unwrap();
    assert!(!filter.contains("a"));
    filter.add("a");
    assert!(filter.contains("a"));
    assert!(filter.contains("anything else"));
    assert_that!(filter.saturation(), eq(1.0));
    assert_that!(filter.to_string().as_str(), eq("1"));
}
