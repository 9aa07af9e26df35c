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

use crate::error::Error;

/// A fixed-length bit vector packed into `u64` words.
///
/// Bits are only ever turned on. The running count of set bits backs the cheap
/// `is_empty`/`bits_used` queries; saturation is computed by [`count_ones`](Self::count_ones),
/// a hardware popcount over the words, which always equals the running count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitVector {
    /// Number of addressable bits
    num_bits: u64,
    /// Count of bits set to 1
    num_bits_set: u64,
    /// Length = ceil(num_bits / 64); bits past `num_bits` stay zero
    words: Box<[u64]>,
}

impl BitVector {
    /// Allocates a zeroed vector of `num_bits` bits.
    ///
    /// Fails if the backing words cannot be addressed on this target.
    pub(crate) fn new(num_bits: u64) -> Result<Self, Error> {
        // the backing allocation may not exceed isize::MAX bytes
        let num_words = usize::try_from(num_bits.div_ceil(64))
            .ok()
            .filter(|words| words.checked_mul(8).is_some_and(|b| b <= isize::MAX as usize))
            .ok_or_else(|| {
                Error::invalid_parameter("size exceeds the addressable memory of this target")
                    .with_context("size", num_bits)
            })?;
        Ok(BitVector {
            num_bits,
            num_bits_set: 0,
            words: vec![0u64; num_words].into_boxed_slice(),
        })
    }

    pub(crate) fn len(&self) -> u64 {
        self.num_bits
    }

    pub(crate) fn num_bits_set(&self) -> u64 {
        self.num_bits_set
    }

    /// Number of whole bytes needed to hold `len()` bits.
    pub(crate) fn byte_size(&self) -> u64 {
        self.num_bits.div_ceil(8)
    }

    /// Population count over the backing words.
    pub(crate) fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Gets the value of a single bit.
    pub(crate) fn get(&self, bit_index: u64) -> bool {
        debug_assert!(bit_index < self.num_bits);
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);
        (self.words[word_index] & mask) != 0
    }

    /// Sets a single bit, returning whether it was previously unset.
    pub(crate) fn set(&mut self, bit_index: u64) -> bool {
        debug_assert!(bit_index < self.num_bits);
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);

        let word = &mut self.words[word_index];
        if (*word & mask) == 0 {
            *word |= mask;
            self.num_bits_set += 1;
            true
        } else {
            false
        }
    }

    /// Iterates over every bit, index 0 first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.num_bits).map(move |i| self.get(i))
    }
}
