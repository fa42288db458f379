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

use std::fmt::{Debug, Formatter};

use cloudstack_sign_core::utils::Redact;

/// Credential for the CloudStack API, an API key and its secret key.
#[derive(Clone, Default)]
pub struct Credential {
    /// API key, sent with every request as `apikey`.
    pub api_key: String,
    /// Secret key, used to sign requests and never sent.
    pub secret_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Check if both keys are present.
    pub fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("key", "secret").is_valid());
        assert!(!Credential::new("", "secret").is_valid());
        assert!(!Credential::new("key", "").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new("plgWJfZK4gyS3mOMTVmjUVg", "VDaACYb0LV9eNjTetIOElcVQ");
        let s = format!("{cred:?}");

        assert_eq!(s, "Credential { api_key: plg***UVg, secret_key: VDa***cVQ }");
        assert!(!s.contains("VDaACYb0LV9eNjTetIOElcVQ"));
    }
}
