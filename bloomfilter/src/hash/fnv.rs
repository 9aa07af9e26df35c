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

use super::Hash32;

const OFFSET_BASIS: u32 = 0x811c9dc5;
const PRIME: u32 = 0x01000193;

/// FNV-1a, 32-bit: xor each byte in, then multiply by the FNV prime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1a32;

impl Fnv1a32 {
    /// Hashes `bytes` in one shot.
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        bytes.iter().fold(OFFSET_BASIS, |h, &b| {
            (h ^ u32::from(b)).wrapping_mul(PRIME)
        })
    }
}

impl Hash32 for Fnv1a32 {
    fn hash32(&self, bytes: &[u8]) -> u32 {
        self.hash(bytes)
    }
}
