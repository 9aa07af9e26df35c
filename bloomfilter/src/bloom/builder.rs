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

use std::f64::consts::LN_2;

use rand::CryptoRng;
use rand::RngCore;
use rand::rngs::OsRng;

use super::BloomFilter;
use super::bits::BitVector;
use super::deriver::HashDeriver;
use super::seeds::generate_seeds;
use super::seeds::seed_count;
use crate::error::Error;
use crate::hash::BASE_HASH_COUNT;
use crate::hash::BaseHash;
use crate::hash::DEFAULT_HASHERS;
use crate::hash::Hash32;

/// False positive rate used when the caller does not pick one.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 1.0e-7;
/// Smallest bit array a filter can have.
pub const MIN_SIZE: u64 = 1;
/// Largest bit array a filter can have.
pub const MAX_SIZE: u64 = i32::MAX as u64 * 64;
/// Fewest hash rounds a filter can use.
pub const MIN_HASH_ROUNDS: u32 = 1;
/// Most hash rounds a filter can use.
pub const MAX_HASH_ROUNDS: u32 = i16::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sizing {
    Accuracy { expected_elements: u64 },
    Explicit { size: u64, hash_rounds: u32 },
}

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): Specify expected elements and, optionally, a
///   false positive rate (recommended)
/// - [`with_size()`](Self::with_size): Specify bit count and hash rounds (manual)
///
/// Parameters are validated by [`build()`](Self::build), which is the only fallible step.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H = BaseHash> {
    sizing: Sizing,
    false_positive_rate: f64,
    hashers: [H; BASE_HASH_COUNT],
}

impl BloomFilterBuilder {
    /// Creates a builder that sizes the filter for `expected_elements` keys.
    ///
    /// The false positive rate defaults to [`DEFAULT_FALSE_POSITIVE_RATE`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000)
    ///     .false_positive_rate(0.01)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.hash_rounds(), 7);
    /// ```
    pub fn with_accuracy(expected_elements: u64) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Accuracy { expected_elements },
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            hashers: DEFAULT_HASHERS,
        }
    }

    /// Creates a builder with pre-computed parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(1024, 6).build().unwrap();
    /// assert_eq!(filter.size(), 1024);
    /// assert_eq!(filter.seeds().len(), 3);
    /// ```
    pub fn with_size(size: u64, hash_rounds: u32) -> Self {
        BloomFilterBuilder {
            sizing: Sizing::Explicit { size, hash_rounds },
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            hashers: DEFAULT_HASHERS,
        }
    }

    /// Suggests the bit array length for `expected_elements` keys at `false_positive_rate`.
    ///
    /// Formula: `m = ceil(-n * ln(p) / ln(2)^2)`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `expected_elements` is 0, `false_positive_rate` is not strictly inside (0, 1), or the
    /// result exceeds [`MAX_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_size(10_000, 1e-7).unwrap();
    /// assert_eq!(bits, 335_478);
    /// ```
    pub fn suggest_size(expected_elements: u64, false_positive_rate: f64) -> Result<u64, Error> {
        optimal_size(expected_elements, false_positive_rate)
    }

    /// Suggests the number of hash rounds for `expected_elements` keys in `size` bits.
    ///
    /// Formula: `k = ceil((m / n) * ln(2))`, with `m / n` computed in floating point.
    ///
    /// Implementations that divide `m` by `n` as integers before multiplying report one round
    /// fewer in some cases, e.g. 23 instead of 24 for 10,000 keys at 1e-7. Seeds cover rounds
    /// in pairs, so both settle on 24 applied rounds there.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::suggest_hash_rounds(10_000, 335_478), 24);
    /// assert_eq!(BloomFilterBuilder::suggest_hash_rounds(1000, 9586), 7);
    /// ```
    pub fn suggest_hash_rounds(expected_elements: u64, size: u64) -> u32 {
        optimal_hash_rounds(expected_elements, size)
    }
}

impl<H: Hash32> BloomFilterBuilder<H> {
    /// Sets the target false positive rate. Only used by [`with_accuracy`] builders.
    ///
    /// [`with_accuracy`]: BloomFilterBuilder::with_accuracy
    pub fn false_positive_rate(mut self, false_positive_rate: f64) -> Self {
        self.false_positive_rate = false_positive_rate;
        self
    }

    /// Replaces the pair of base hash functions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// # use bloomfilter::hash::MurmurHash3X86_32;
    /// let mut filter = BloomFilterBuilder::with_accuracy(100)
    ///     .hashers([MurmurHash3X86_32::with_seed(1), MurmurHash3X86_32::with_seed(2)])
    ///     .build()
    ///     .unwrap();
    /// filter.add("apple");
    /// assert!(filter.contains("apple"));
    /// ```
    pub fn hashers<G: Hash32>(self, hashers: [G; BASE_HASH_COUNT]) -> BloomFilterBuilder<G> {
        BloomFilterBuilder {
            sizing: self.sizing,
            false_positive_rate: self.false_positive_rate,
            hashers,
        }
    }

    /// Builds the filter, drawing seeds from the operating system's random source.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`](crate::error::ErrorKind::InvalidParameter) for out of
    /// range parameters, or
    /// [`EntropyUnavailable`](crate::error::ErrorKind::EntropyUnavailable) if the random
    /// source fails.
    pub fn build(self) -> Result<BloomFilter<H>, Error> {
        self.build_with_rng(&mut OsRng)
    }

    /// Builds the filter, drawing seeds from `rng`.
    ///
    /// The generator is only used here and is not kept by the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(9001);
    /// let filter = BloomFilterBuilder::with_accuracy(1000)
    ///     .build_with_rng(&mut rng)
    ///     .unwrap();
    /// assert!(filter.is_empty());
    /// ```
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<BloomFilter<H>, Error>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let (size, hash_rounds) = self.resolve()?;
        let bits = BitVector::new(size)?;
        let seeds = generate_seeds(rng, seed_count(hash_rounds))?;
        let deriver = HashDeriver::new(seeds, self.hashers);

        tracing::debug!(
            size,
            hash_rounds,
            effective_hash_rounds = deriver.rounds(),
            seeds = deriver.seeds().len(),
            byte_size = bits.byte_size(),
            "built bloom filter"
        );

        Ok(BloomFilter {
            hash_rounds,
            deriver,
            bits,
        })
    }

    fn resolve(&self) -> Result<(u64, u32), Error> {
        match self.sizing {
            Sizing::Accuracy { expected_elements } => {
                let size = optimal_size(expected_elements, self.false_positive_rate)?;
                let hash_rounds = optimal_hash_rounds(expected_elements, size);
                Ok((size, hash_rounds))
            }
            Sizing::Explicit { size, hash_rounds } => {
                if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                    return Err(Error::out_of_range(
                        "size",
                        size,
                        &format!("[{MIN_SIZE}, {MAX_SIZE}]"),
                    ));
                }
                if !(MIN_HASH_ROUNDS..=MAX_HASH_ROUNDS).contains(&hash_rounds) {
                    return Err(Error::out_of_range(
                        "hash_rounds",
                        hash_rounds,
                        &format!("[{MIN_HASH_ROUNDS}, {MAX_HASH_ROUNDS}]"),
                    ));
                }
                Ok((size, hash_rounds))
            }
        }
    }
}

fn optimal_size(expected_elements: u64, false_positive_rate: f64) -> Result<u64, Error> {
    if expected_elements == 0 {
        return Err(Error::out_of_range("expected_elements", 0, "[1, u64::MAX]"));
    }
    // also rejects NaN
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(Error::out_of_range(
            "false_positive_rate",
            false_positive_rate,
            "(0, 1)",
        ));
    }

    let n = expected_elements as f64;
    let bits = (-n * false_positive_rate.ln() / (LN_2 * LN_2)).ceil();
    if bits > MAX_SIZE as f64 {
        return Err(Error::invalid_parameter(format!(
            "filter would need {bits} bits, more than the maximum of {MAX_SIZE}"
        ))
        .with_context("expected_elements", expected_elements)
        .with_context("false_positive_rate", false_positive_rate));
    }
    Ok((bits as u64).max(MIN_SIZE))
}

fn optimal_hash_rounds(expected_elements: u64, size: u64) -> u32 {
    let m = size as f64;
    let n = expected_elements.max(1) as f64;

    // Ceil to avoid selecting too few rounds.
    let k = (m / n * LN_2).ceil();
    k.clamp(f64::from(MIN_HASH_ROUNDS), f64::from(MAX_HASH_ROUNDS)) as u32
}
