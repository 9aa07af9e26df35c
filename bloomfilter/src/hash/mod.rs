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

//! Base hash functions used to derive bit indexes.
//!
//! A filter only needs one capability from a hash function: turn a byte string into a
//! 32-bit value. [`Hash32`] captures that, and [`BaseHash`] names the two algorithms a
//! filter is wired with unless the caller picks others.

mod fnv;
mod murmurhash;

pub use self::fnv::Fnv1a32;
pub use self::murmurhash::MurmurHash3X86_32;

/// Number of base hash functions in a filter's registry.
pub const BASE_HASH_COUNT: usize = 2;

/// The default registry: MurmurHash3 first, then FNV-1a.
pub const DEFAULT_HASHERS: [BaseHash; BASE_HASH_COUNT] = [BaseHash::Murmur3, BaseHash::Fnv1a];

/// A non-cryptographic hash from bytes to a 32-bit value.
///
/// Implementations must be deterministic: the same bytes always map to the same value for
/// the lifetime of a filter, otherwise `add` and `contains` would probe different bits.
pub trait Hash32 {
    /// Hashes `bytes` to a 32-bit value.
    fn hash32(&self, bytes: &[u8]) -> u32;
}

impl<F> Hash32 for F
where
    F: Fn(&[u8]) -> u32,
{
    fn hash32(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

/// The built-in base hash algorithms.
///
/// The two variants have unrelated mixing structure, which is what lets a handful of
/// seeds stretch them into many effectively independent hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseHash {
    /// MurmurHash3, x86 32-bit variant, seed 0.
    Murmur3,
    /// FNV-1a, 32-bit.
    Fnv1a,
}

impl Hash32 for BaseHash {
    fn hash32(&self, bytes: &[u8]) -> u32 {
        match self {
            BaseHash::Murmur3 => MurmurHash3X86_32::default().hash32(bytes),
            BaseHash::Fnv1a => Fnv1a32.hash32(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_hash_dispatch() {
        let key = b"hello";
        assert_eq!(BaseHash::Murmur3.hash32(key), 0x248bfa47);
        assert_eq!(BaseHash::Fnv1a.hash32(key), 0x4f9f2cab);
    }

    #[test]
    fn test_closure_is_a_hasher() {
        let len_hash = |bytes: &[u8]| bytes.len() as u32;
        assert_eq!(len_hash.hash32(b"abc"), 3);
    }
}
