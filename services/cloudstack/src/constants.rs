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

// Env values used in cloudstack services.
pub const CLOUDSTACK_API_KEY: &str = "CLOUDSTACK_API_KEY";
pub const CLOUDSTACK_SECRET_KEY: &str = "CLOUDSTACK_SECRET_KEY";
pub const CLOUDSTACK_SCHEME: &str = "CLOUDSTACK_SCHEME";
pub const CLOUDSTACK_HOST: &str = "CLOUDSTACK_HOST";
pub const CLOUDSTACK_PORT: &str = "CLOUDSTACK_PORT";
pub const CLOUDSTACK_PATH_PREFIX: &str = "CLOUDSTACK_PATH_PREFIX";

// Defaults of the management API.
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_PATH_PREFIX: &str = "client";
pub const DEFAULT_COMMAND_PATH: &str = "api";

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
