use bitcoin::{ScriptBuf, Transaction, XOnlyPublicKey};
use strata_primitives::l1::BitcoinXOnlyPublicKey;

use crate::errors::CommitInputError;

/// The index of the Claim output that must be spent by the Commit transaction.
/// This is the first output (index 0) of the Claim transaction.
pub const CLAIM_OUTPUT_INDEX: usize = 0;

/// The index of the N/N continuation output in the Commit transaction.
/// This output must be locked to the N/N aggregated operator key.
pub const COMMIT_NN_OUTPUT_INDEX: usize = 1;

// TODO:PG: add validatation that this transaction was created by spending N/N UTXO.

/// Validates that the second output of the commit transaction is locked to the N/N
/// aggregated operator key.
///
/// This function verifies that the commit transaction's second output (at index 1) is a P2TR
/// output locked to the provided aggregated operator public key with no merkle root
/// (key-spend only). This ensures the N/N chain continues for subsequent transactions.
///
/// # Parameters
///
/// - `tx` - The commit transaction to validate
/// - `operators_agg_pubkey` - The aggregated operator public key that should control the output
///
/// # Returns
///
/// - `Ok(())` - If the second output is properly locked to the operator key
/// - `Err(CommitInputError)` - If the output is missing, has wrong script type, or wrong key
pub fn validate_commit_nn_output(
    tx: &Transaction,
    operators_agg_pubkey: &BitcoinXOnlyPublicKey,
) -> Result<(), CommitInputError> {
    // Get the second output at the expected index
    let nn_output = tx
        .output
        .get(COMMIT_NN_OUTPUT_INDEX)
        .ok_or(CommitInputError::MissingSecondOutput)?;

    // Extract the internal key from the P2TR script
    let secp = secp256k1::SECP256K1;
    let operators_pubkey = XOnlyPublicKey::from_slice(operators_agg_pubkey.inner().as_bytes())
        .map_err(|_| CommitInputError::InvalidOperatorKey)?;

    // Create expected P2TR script with no merkle root (key-spend only)
    let expected_script = ScriptBuf::new_p2tr(secp, operators_pubkey, None);

    // Verify the second output script matches the expected P2TR script
    if nn_output.script_pubkey != expected_script {
        return Err(CommitInputError::WrongSecondOutputLock);
    }

    Ok(())
}
