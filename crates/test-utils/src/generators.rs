//! Order id generators.

use order_address_key_deriv::{order_id::ORDER_ID_LEN, OrderId};
use proptest::prelude::*;
use rand::{thread_rng, Rng};

/// Generates a random order id.
pub fn generate_order_id() -> OrderId {
    let mut bytes = [0u8; ORDER_ID_LEN];
    thread_rng().fill(&mut bytes);

    OrderId::from_bytes(bytes)
}

/// Generates an arbitrary order id.
pub fn arb_order_id() -> impl Strategy<Value = OrderId> {
    any::<[u8; ORDER_ID_LEN]>().prop_map(OrderId::from_bytes)
}

/// Every order id that differs from `base` in exactly one byte.
pub fn single_byte_variants(base: &OrderId) -> Vec<OrderId> {
    let base = *base.as_bytes();

    (0..ORDER_ID_LEN)
        .flat_map(|pos| {
            (0..=u8::MAX)
                .filter(move |&b| b != base[pos])
                .map(move |b| {
                    let mut bytes = base;
                    bytes[pos] = b;
                    OrderId::from_bytes(bytes)
                })
        })
        .collect()
}
