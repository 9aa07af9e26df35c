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

use rand::CryptoRng;
use rand::RngCore;

use crate::error::Error;
use crate::hash::BASE_HASH_COUNT;

/// Random bytes drawn per seed.
pub(crate) const SEED_BYTES: usize = 16;

/// Length of a hex encoded seed.
pub(crate) const SEED_HEX_LEN: usize = SEED_BYTES * 2;

/// Number of seeds needed so that seeds x base hashes covers `hash_rounds`.
///
/// Rounds up, so an odd round count gains one extra round instead of losing one.
pub(crate) fn seed_count(hash_rounds: u32) -> usize {
    hash_rounds.div_ceil(BASE_HASH_COUNT as u32) as usize
}

/// Draws `count` hex encoded seeds from a cryptographically secure source.
pub(crate) fn generate_seeds<R>(rng: &mut R, count: usize) -> Result<Vec<String>, Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = [0u8; SEED_BYTES];
    let mut seeds = Vec::with_capacity(count);
    for i in 0..count {
        rng.try_fill_bytes(&mut buf)
            .map_err(|err| Error::entropy_unavailable(err).with_context("seed", i))?;
        seeds.push(hex::encode(buf));
    }
    Ok(seeds)
}

/// A secure-looking generator that fails after a fixed number of fills.
#[cfg(test)]
pub(crate) struct ExhaustedRng {
    pub(crate) fills_left: usize,
}

#[cfg(test)]
impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0xab);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if self.fills_left == 0 {
            return Err(rand::Error::new("boom"));
        }
        self.fills_left -= 1;
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
impl CryptoRng for ExhaustedRng {}
