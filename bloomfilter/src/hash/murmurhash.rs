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

use byteorder::ByteOrder;
use byteorder::LE;

use super::Hash32;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// MurmurHash3 (x86, 32-bit) is a fast, non-cryptographic hash with good avalanche
/// behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MurmurHash3X86_32 {
    seed: u32,
}

impl MurmurHash3X86_32 {
    /// Creates a hasher that starts from the given seed.
    pub fn with_seed(seed: u32) -> Self {
        MurmurHash3X86_32 { seed }
    }

    /// Returns the seed this hasher starts from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Hashes `bytes` in one shot.
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        let mut h1 = self.seed;

        // body: 4-byte blocks
        let blocks = bytes.len() >> 2;
        for i in 0..blocks {
            let lo = i << 2;
            let k1 = LE::read_u32(&bytes[lo..lo + 4]);
            h1 ^= mix_k1(k1);
            h1 = h1.rotate_left(13);
            h1 = h1.wrapping_mul(5).wrapping_add(0xe6546b64);
        }

        // tail
        let tail = &bytes[blocks << 2..];
        if !tail.is_empty() {
            let mut buf = [0u8; 4];
            buf[..tail.len()].copy_from_slice(tail);
            h1 ^= mix_k1(u32::from_le_bytes(buf));
        }

        // the reference folds the length in as a 32-bit value
        h1 ^= bytes.len() as u32;
        fmix32(h1)
    }
}

impl Hash32 for MurmurHash3X86_32 {
    fn hash32(&self, bytes: &[u8]) -> u32 {
        self.hash(bytes)
    }
}

#[inline]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn murmurhash3_x86_32(key: &[u8], seed: u32) -> u32 {
        MurmurHash3X86_32::with_seed(seed).hash(key)
    }

    #[test]
    fn test_empty() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e28b7);
    }

    #[test]
    fn test_remainder() {
        // remainder = 1
        assert_eq!(murmurhash3_x86_32(b"a", 0), 0x3c2569b2);
        assert_eq!(murmurhash3_x86_32(b"a", 1), 0x588adce8);

        // remainder = 1 after one block
        assert_eq!(murmurhash3_x86_32(b"hello", 0), 0x248bfa47);
        assert_eq!(murmurhash3_x86_32(b"hello", 1), 0xbb4abcad);

        // remainder = 2
        assert_eq!(murmurhash3_x86_32(b"foobar", 0), 0xa4c4d4bd);
        assert_eq!(murmurhash3_x86_32(b"foobar", 1), 0x6c9b7a46);

        // remainder = 3
        let key = "The quick brown fox jumps over the lazy dog";
        assert_eq!(murmurhash3_x86_32(key.as_bytes(), 0), 0x2e4ff723);
        assert_eq!(murmurhash3_x86_32(key.as_bytes(), 1), 0x78e69e27);
    }

    #[test]
    fn test_default_seed_is_zero() {
        assert_eq!(MurmurHash3X86_32::default().seed(), 0);
        assert_eq!(
            MurmurHash3X86_32::default().hash32(b"hello"),
            murmurhash3_x86_32(b"hello", 0)
        );
    }
}
