//! Commonly used fixtures and generators.

pub use crate::{
    fixtures::{
        shared_deriver, test_base_key, test_deriver, test_secret_key_base, TEST_SECRET_KEY_BASE,
        TEST_SEED,
    },
    generators::{arb_order_id, generate_order_id, single_byte_variants},
};
