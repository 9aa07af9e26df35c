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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a key is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was added, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for keys never added
//! - **Fixed size**: The bit array is sized once, from the expected number of keys
//! - **Add only**: Keys cannot be removed
//!
//! # Usage
//!
//! ```rust
//! use bloomfilter::bloom::BloomFilter;
//!
//! // Create a filter for 1000 keys with a 1% false positive rate
//! let mut filter = BloomFilter::new(1000, 0.01).unwrap();
//!
//! // Add keys
//! filter.add("apple").add("banana");
//!
//! // Check membership
//! assert!(filter.contains("apple")); // true - definitely added
//! assert!(!filter.contains("grape")); // false - never added (probably)
//!
//! // Get statistics
//! println!("Size: {} bits ({} bytes)", filter.size(), filter.byte_size());
//! println!("Saturation: {:.4}", filter.saturation());
//! println!("Est. FPP: {:.6}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Sizing
//!
//! For `n` expected keys and a target false positive rate `p`:
//!
//! ```text
//! m = ceil(-n * ln(p) / ln(2)^2)    bits
//! k = ceil((m / n) * ln(2))         hash rounds
//! ```
//!
//! The rate defaults to [`DEFAULT_FALSE_POSITIVE_RATE`] (1e-7), which costs about 34 bits
//! and 24 rounds per key.
//!
//! # Hashing
//!
//! Rather than `k` distinct hash algorithms, the filter uses two base hashes (MurmurHash3
//! and FNV-1a, both 32-bit) and `ceil(k / 2)` random seeds. Each seed is appended to the key
//! as `"<key>_<seed>"` and hashed by both base functions, giving `2 * ceil(k / 2)` values per
//! key. Each value `h` selects bit `h mod m`.
//!
//! Seeds are 16 random bytes, hex encoded, drawn from a cryptographically secure source
//! once per filter. Two filters therefore never share bit positions for the same key.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod bits;
mod builder;
mod deriver;
mod seeds;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::DEFAULT_FALSE_POSITIVE_RATE;
pub use self::builder::MAX_HASH_ROUNDS;
pub use self::builder::MAX_SIZE;
pub use self::builder::MIN_HASH_ROUNDS;
pub use self::builder::MIN_SIZE;
pub use self::sketch::BloomFilter;
