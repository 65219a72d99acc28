// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod invoker;
pub mod units;

pub use factory::LocalUnitFactory;
pub use invoker::LocalInvoker;
pub use units::*;
