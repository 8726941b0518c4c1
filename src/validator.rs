//! Transaction validation against a given UTXO snapshot
//!
//! Validation is always evaluated against a caller-supplied [`UtxoSet`],
//! never a single global pool, because the live set differs per branch.

use crate::crypto::verify_signature;
use crate::error::{LedgerError, Result};
use crate::types::{Amount, Transaction};
use crate::utxo::UtxoSet;
use std::collections::HashSet;

/// Check `tx` against `utxo_set`; the `Ok` value is the implicit fee
/// (input total minus output total), discarded by callers that only
/// need the verdict.
///
/// A transaction is valid if and only if:
/// 1. every input's claimed output exists in `utxo_set`,
/// 2. every input's signature verifies against the claimed output's
///    owner over the input's signable payload,
/// 3. no output is claimed by more than one input,
/// 4. every declared output value is non-negative, and
/// 5. the input total covers the output total.
///
/// Minting is not expressible here. A coinbase carried in a batch is
/// held to the same rules, and its outputs exceed its empty input list;
/// new value enters only through a block's dedicated coinbase slot,
/// which the chain layer applies after validation.
pub fn check_transaction(tx: &Transaction, utxo_set: &UtxoSet) -> Result<Amount> {
    let mut claimed = HashSet::new();
    let mut input_total: i128 = 0;

    for (i, input) in tx.inputs.iter().enumerate() {
        let id = input.claimed_utxo();

        // (1) claimed output must be live on this branch
        let output = utxo_set
            .get(&id)
            .ok_or(LedgerError::MissingUtxo { input: i })?;

        // (2) signature over this input's signable payload
        let payload = tx.signable_payload(i)?;
        if !verify_signature(&output.owner, &payload, &input.signature) {
            return Err(LedgerError::InvalidSignature { input: i });
        }

        // (3) no double claim within the transaction
        if !claimed.insert(id) {
            return Err(LedgerError::DoubleClaim { input: i });
        }

        input_total += i128::from(output.value);
    }

    // (4) declared outputs are non-negative
    let mut output_total: i128 = 0;
    for (i, output) in tx.outputs.iter().enumerate() {
        if output.value < 0 {
            return Err(LedgerError::NegativeOutput {
                output: i,
                value: output.value,
            });
        }
        output_total += i128::from(output.value);
    }

    // (5) the surplus is an implicit fee, never transferred anywhere.
    // Totals are accumulated widened, so sums past the Amount limits
    // reject here instead of wrapping.
    if input_total < output_total {
        return Err(LedgerError::ValueConservation {
            input_total: clamp_amount(input_total),
            output_total: clamp_amount(output_total),
        });
    }

    Ok(clamp_amount(input_total - output_total))
}

/// Narrow a widened running total back to the `Amount` domain,
/// saturating at the bounds
fn clamp_amount(total: i128) -> Amount {
    total.clamp(i128::from(Amount::MIN), i128::from(Amount::MAX)) as Amount
}

/// Boolean form of [`check_transaction`]
pub fn is_valid(tx: &Transaction, utxo_set: &UtxoSet) -> bool {
    check_transaction(tx, utxo_set).is_ok()
}

/// Apply `tx` to `utxo_set`: spend its claimed outputs, create its
/// declared ones. Coinbase transactions only create.
pub fn apply_transaction(tx: &Transaction, utxo_set: &mut UtxoSet) {
    if !tx.is_coinbase() {
        for input in &tx.inputs {
            utxo_set.remove(&input.claimed_utxo());
        }
    }
    for (i, output) in tx.outputs.iter().enumerate() {
        utxo_set.put(tx.output_id(i), output.clone());
    }
}

/// Select a mutually consistent subset of `txs` and mutate `utxo_set`
/// to reflect it.
///
/// Acceptance order is batch order: each transaction is checked against
/// the already-mutated set and, if valid, applied immediately, so a
/// later transaction may spend an output created earlier in the same
/// batch. When two transactions claim the same output, the earlier one
/// in the batch wins; the loser is skipped and not retried. This
/// first-claim-wins order dependence is a deliberate, documented policy
/// rather than an accident of iteration.
pub fn apply_batch(txs: &[Transaction], utxo_set: &mut UtxoSet) -> Vec<Transaction> {
    let mut accepted = Vec::new();
    for tx in txs {
        if check_transaction(tx, utxo_set).is_ok() {
            apply_transaction(tx, utxo_set);
            accepted.push(tx.clone());
        }
    }
    accepted
}
