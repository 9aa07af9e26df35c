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

use std::fmt;
use std::fmt::Write;
use std::ops::ControlFlow;

use super::BloomFilterBuilder;
use super::DEFAULT_FALSE_POSITIVE_RATE;
use super::bits::BitVector;
use super::deriver::HashDeriver;
use crate::error::Error;
use crate::hash::BaseHash;
use crate::hash::Hash32;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (added keys always return `true`)
/// - A false positive rate chosen at construction
/// - Constant space usage
///
/// Keys are anything that can be viewed as bytes (`&str`, `String`, `&[u8]`, ...).
///
/// Not synchronized: share across threads behind a lock if any thread adds keys.
///
/// Use [`BloomFilterBuilder`] for full control over construction.
#[derive(Debug, Clone)]
pub struct BloomFilter<H = BaseHash> {
    /// Number of rounds requested at construction (k)
    pub(super) hash_rounds: u32,
    /// Seeds and base hash functions
    pub(super) deriver: HashDeriver<H>,
    /// Bit array of length m
    pub(super) bits: BitVector,
}

impl BloomFilter {
    /// Creates a filter sized for `expected_elements` keys at `false_positive_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `expected_elements` is 0 or `false_positive_rate` is not strictly inside (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let filter = BloomFilter::new(10_000, 1e-7).unwrap();
    /// assert_eq!(filter.size(), 335_478);
    /// assert_eq!(filter.hash_rounds(), 24);
    ///
    /// assert!(BloomFilter::new(0, 1e-7).is_err());
    /// assert!(BloomFilter::new(10, 1.0).is_err());
    /// ```
    pub fn new(expected_elements: u64, false_positive_rate: f64) -> Result<Self, Error> {
        BloomFilterBuilder::with_accuracy(expected_elements)
            .false_positive_rate(false_positive_rate)
            .build()
    }

    /// Creates a filter sized for `expected_elements` keys at the default rate.
    ///
    /// See [`DEFAULT_FALSE_POSITIVE_RATE`].
    pub fn with_expected_elements(expected_elements: u64) -> Result<Self, Error> {
        Self::new(expected_elements, DEFAULT_FALSE_POSITIVE_RATE)
    }
}

impl<H: Hash32> BloomFilter<H> {
    /// Adds a key to the filter.
    ///
    /// After this, `contains(key)` always returns `true`. Adding a key twice has no further
    /// effect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.add("apple").add("banana").add(b"\x00\x01");
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(filter.contains("banana"));
    /// assert!(filter.contains(b"\x00\x01"));
    /// ```
    pub fn add<K>(&mut self, key: &K) -> &mut Self
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let size = self.bits.len();
        let bits = &mut self.bits;
        self.deriver.for_each(key, |h| {
            bits.set(u64::from(h) % size);
        });
        self
    }

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** added (or false positive)
    /// - `false`: Key was **definitely not** added
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.add("apple");
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(!filter.contains("grape")); // never added (probably)
    /// ```
    pub fn contains<K>(&self, key: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }

        let size = self.bits.len();
        self.deriver
            .try_for_each(key, |h| {
                if self.bits.get(u64::from(h) % size) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(())
                }
            })
            .is_continue()
    }

    /// Tests and adds a key in a single pass over its hashes.
    ///
    /// Returns whether the key was possibly present before this call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// assert!(!filter.contains_and_add("apple")); // first insertion
    /// assert!(filter.contains_and_add("apple")); // now it's in the set
    /// ```
    pub fn contains_and_add<K>(&mut self, key: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let size = self.bits.len();
        let bits = &mut self.bits;
        let mut was_present = true;
        self.deriver.for_each(key, |h| {
            if bits.set(u64::from(h) % size) {
                was_present = false;
            }
        });
        was_present
    }

    /// Returns the raw hash values derived for `key`, one per (seed, base hash) pair.
    ///
    /// The values are not reduced modulo [`size()`](Self::size).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let filter = BloomFilter::new(10_000, 1e-7).unwrap();
    /// let hashes = filter.hashes("apple");
    /// assert_eq!(hashes.len(), filter.effective_hash_rounds() as usize);
    /// assert_eq!(hashes, filter.hashes("apple"));
    /// ```
    pub fn hashes<K>(&self, key: &K) -> Vec<u32>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.deriver.hashes(key)
    }

    /// Returns whether no key has been added yet.
    pub fn is_empty(&self) -> bool {
        self.bits.num_bits_set() == 0
    }

    /// Returns the number of bits in the filter (m).
    pub fn size(&self) -> u64 {
        self.bits.len()
    }

    /// Returns the number of bytes the bit array occupies.
    pub fn byte_size(&self) -> u64 {
        self.bits.byte_size()
    }

    /// Returns the number of hash rounds requested at construction (k).
    pub fn hash_rounds(&self) -> u32 {
        self.hash_rounds
    }

    /// Returns the number of hash rounds actually applied per key.
    ///
    /// This is [`hash_rounds()`](Self::hash_rounds) rounded up to a multiple of the number
    /// of base hash functions.
    pub fn effective_hash_rounds(&self) -> u32 {
        self.deriver.rounds() as u32
    }

    /// Returns the seeds, in the order they are applied.
    pub fn seeds(&self) -> &[String] {
        self.deriver.seeds()
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.bits.num_bits_set()
    }

    /// Returns the fraction of bits set, in `[0, 1]`.
    ///
    /// The fraction never decreases, since bits are never cleared. The false positive rate
    /// grows with it.
    pub fn saturation(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// Uses the approximation `saturation^k` with k the effective hash rounds. This assumes
    /// uniformly distributed bits.
    pub fn estimated_fpp(&self) -> f64 {
        self.saturation().powf(f64::from(self.effective_hash_rounds()))
    }
}

impl<H, K> Extend<K> for BloomFilter<H>
where
    H: Hash32,
    K: AsRef<[u8]>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.add(&key);
        }
    }
}

/// Renders the bit array as `0`s and `1`s, bit 0 first.
impl<H> fmt::Display for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
