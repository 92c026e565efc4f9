// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod model;
pub mod nav;
pub mod state;
pub mod theme;

pub use ids::*;
pub use model::*;
pub use nav::*;
pub use state::*;
pub use theme::*;
