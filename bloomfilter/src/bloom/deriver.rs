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

use std::convert::Infallible;
use std::ops::ControlFlow;

use super::seeds::SEED_HEX_LEN;
use crate::hash::BASE_HASH_COUNT;
use crate::hash::Hash32;

/// Stretches a pair of base hash functions into many rounds by salting the key.
///
/// For every seed, in generation order, and every base hash, in registry order, the key is
/// hashed as `key ++ "_" ++ seed`. With `s` seeds this yields `s * BASE_HASH_COUNT` values.
/// Values are raw hash outputs; reducing them to bit indexes is the caller's job.
#[derive(Debug, Clone)]
pub(crate) struct HashDeriver<H> {
    seeds: Vec<String>,
    hashers: [H; BASE_HASH_COUNT],
}

impl<H: Hash32> HashDeriver<H> {
    pub(crate) fn new(seeds: Vec<String>, hashers: [H; BASE_HASH_COUNT]) -> Self {
        HashDeriver { seeds, hashers }
    }

    pub(crate) fn seeds(&self) -> &[String] {
        &self.seeds
    }

    /// Number of values produced per key.
    pub(crate) fn rounds(&self) -> usize {
        self.seeds.len() * BASE_HASH_COUNT
    }

    /// Feeds every derived value for `key` to `f`.
    pub(crate) fn for_each<K, F>(&self, key: &K, mut f: F)
    where
        K: AsRef<[u8]> + ?Sized,
        F: FnMut(u32),
    {
        let flow = self.try_for_each(key, |h| {
            f(h);
            ControlFlow::<Infallible>::Continue(())
        });
        match flow {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Feeds every derived value for `key` to `f`, stopping early on `Break`.
    pub(crate) fn try_for_each<K, B, F>(&self, key: &K, mut f: F) -> ControlFlow<B>
    where
        K: AsRef<[u8]> + ?Sized,
        F: FnMut(u32) -> ControlFlow<B>,
    {
        let key = key.as_ref();
        let mut salted = Vec::with_capacity(key.len() + 1 + SEED_HEX_LEN);
        salted.extend_from_slice(key);
        salted.push(b'_');
        let prefix_len = salted.len();

        for seed in &self.seeds {
            salted.truncate(prefix_len);
            salted.extend_from_slice(seed.as_bytes());
            for hasher in &self.hashers {
                f(hasher.hash32(&salted))?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Collects every derived value for `key`.
    pub(crate) fn hashes<K>(&self, key: &K) -> Vec<u32>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let mut hashes = Vec::with_capacity(self.rounds());
        self.for_each(key, |h| hashes.push(h));
        hashes
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::HashDeriver;
    use crate::hash::BaseHash;
    use crate::hash::DEFAULT_HASHERS;
    use crate::hash::Hash32;

    fn deriver(seeds: &[&str]) -> HashDeriver<BaseHash> {
        HashDeriver::new(seeds.iter().map(|s| s.to_string()).collect(), DEFAULT_HASHERS)
    }

    #[test]
    fn test_salted_key_order() {
        let d = deriver(&["s1", "s2"]);
        let hashes = d.hashes("key");
        assert_eq!(
            hashes,
            vec![
                BaseHash::Murmur3.hash32(b"key_s1"),
                BaseHash::Fnv1a.hash32(b"key_s1"),
                BaseHash::Murmur3.hash32(b"key_s2"),
                BaseHash::Fnv1a.hash32(b"key_s2"),
            ]
        );
        assert_eq!(d.rounds(), 4);
    }

    #[test]
    fn test_str_and_bytes_agree() {
        let d = deriver(&["abc"]);
        assert_eq!(d.hashes("apple"), d.hashes(b"apple"));
        assert_eq!(d.hashes("apple"), d.hashes(&String::from("apple")));
        assert_ne!(d.hashes("apple"), d.hashes("apples"));
    }

    #[test]
    fn test_break_stops_early() {
        let d = deriver(&["a", "b", "c"]);
        let mut seen = 0;
        let flow = d.try_for_each("k", |_| {
            seen += 1;
            if seen == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_for_each_visits_every_round() {
        let d = deriver(&["a", "b", "c"]);
        let mut seen = Vec::new();
        d.for_each("k", |h| seen.push(h));
        assert_eq!(seen.len(), d.rounds());
        assert_eq!(seen, d.hashes("k"));
    }

    #[test]
    fn test_no_seeds_no_hashes() {
        let d = deriver(&[]);
        assert!(d.hashes("k").is_empty());
    }
}
