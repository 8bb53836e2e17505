// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod workers;
pub mod services;
pub mod appointments;
pub mod loans;
pub mod reports;
pub mod exporter;
pub mod settings;
pub mod doctor;
