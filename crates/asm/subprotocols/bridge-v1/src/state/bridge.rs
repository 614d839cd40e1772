use bitcoin::Transaction;
use borsh::{BorshDeserialize, BorshSerialize};
use strata_asm_txs_bridge_v1::{
    deposit::{DepositInfo, validate_deposit_output_lock, validate_drt_spending_signature},
    errors::Mismatch,
    withdrawal_fulfillment::WithdrawalFulfillmentInfo,
};
use strata_primitives::l1::{BitcoinAmount, L1BlockCommitment};

use crate::{
    errors::{DepositValidationError, WithdrawalCommandError, WithdrawalValidationError},
    state::{
        assignment::AssignmentTable,
        config::BridgeV1Config,
        deposit::{DepositEntry, DepositsTable},
        operator::OperatorTable,
        withdrawal::{OperatorClaimUnlock, WithdrawOutput, WithdrawalCommand},
    },
};

/// Main state container for the Bridge V1 subprotocol.
///
/// This structure holds all the persistent state for the bridge, including
/// operator registrations, deposit tracking, and assignment management.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub struct BridgeV1State {
    /// Table of registered bridge operators.
    operators: OperatorTable,

    /// Table of Bitcoin deposits managed by the bridge.
    deposits: DepositsTable,

    /// Table of operator assignments for withdrawal processing.
    assignments: AssignmentTable,

    /// The amount of bitcoin expected to be locked in the N/N multisig.
    denomination: BitcoinAmount,

    /// Amount the operator can take as fees for processing withdrawal.
    operator_fee: BitcoinAmount,
}

impl BridgeV1State {
    /// Creates a new bridge state with the specified configuration.
    ///
    /// Initializes all component tables as empty, creates an operator table from the provided
    /// operator public keys, and sets the expected deposit denomination and deadline duration
    /// for validation and assignment management.
    ///
    /// # Parameters
    ///
    /// - `config` - Configuration containing operator public keys, denomination, and deadline
    ///   duration
    ///
    /// # Returns
    ///
    /// A new [`BridgeV1State`] instance.
    pub fn new(config: &BridgeV1Config) -> Self {
        let operators = OperatorTable::from_operator_list(&config.operators);
        Self {
            operators,
            deposits: DepositsTable::new_empty(),
            assignments: AssignmentTable::new(config.assignment_duration),
            denomination: config.denomination,
            operator_fee: config.operator_fee,
        }
    }

    /// Returns a reference to the operator table.
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Returns a reference to the deposits table.
    pub fn deposits(&self) -> &DepositsTable {
        &self.deposits
    }

    /// Returns a reference to the assignments table.
    pub fn assignments(&self) -> &AssignmentTable {
        &self.assignments
    }

    /// Validates a deposit transaction and info against bridge state requirements.
    ///
    /// This function performs comprehensive validation of a deposit by verifying:
    /// - The deposit amount matches the bridge's expected amount
    /// - The Deposit Request Transaction (DRT) spending signature is valid
    /// - The deposit output is properly locked to the aggregated operator key
    /// - The deposit index is unique within the deposits table
    ///
    /// # Parameters
    ///
    /// - `tx` - The Bitcoin transaction containing the deposit
    /// - `info` - The parsed deposit information to validate
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the deposit passes all validation checks
    /// - `Err(DepositError)` - If validation fails for any reason
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The deposit amount doesn't match the bridge's expected amount
    /// - The DRT spending signature is invalid or doesn't match the aggregated operator key
    /// - The deposit output lock is incorrect
    /// - A deposit with the same index already exists
    fn validate_deposit(
        &self,
        tx: &Transaction,
        info: &DepositInfo,
    ) -> Result<(), DepositValidationError> {
        // Verify the deposit amount matches the bridge's expected amount
        if info.amt.to_sat() != self.denomination.to_sat() {
            return Err(DepositValidationError::MismatchDepositAmount(Mismatch {
                expected: self.denomination.to_sat(),
                got: info.amt.to_sat(),
            }));
        }

        // Validate the DRT spending signature against the aggregated operator key
        validate_drt_spending_signature(
            tx,
            info.drt_tapscript_merkle_root,
            self.operators().agg_key(),
            info.amt.into(),
        )?;

        // Ensure the deposit output is properly locked to the aggregated operator key
        validate_deposit_output_lock(tx, self.operators().agg_key())?;

        // Verify this deposit index hasn't been used before
        if self.deposits().get_deposit(info.deposit_idx).is_some() {
            return Err(DepositValidationError::DepositIdxAlreadyExists(
                info.deposit_idx,
            ));
        }

        Ok(())
    }

    /// Processes a deposit transaction by validating and adding it to the deposits table.
    ///
    /// This function takes already parsed deposit transaction information, validates it against the
    /// current state, and creates a new deposit entry in the deposits table if
    /// validation passes. Only operators that are currently active in the N/N multisig set
    /// are included as notary operators for the deposit.
    ///
    /// # Parameters
    ///
    /// - `tx` - The deposit transaction
    /// - `info` - Parsed deposit information containing amount, destination, and outpoint
    ///
    /// # Returns
    ///
    /// - `Ok(u32)` - The deposit index assigned to the newly created deposit entry
    /// - `Err(DepositError)` - If validation fails for any reason
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The deposit amount is zero or negative
    /// - The internal key doesn't match the current aggregated operator key
    /// - The deposit index already exists in the deposits table
    pub fn process_deposit_tx(
        &mut self,
        tx: &Transaction,
        info: &DepositInfo,
    ) -> Result<(), DepositValidationError> {
        // Validate the deposit first
        self.validate_deposit(tx, info)?;
        let notary_operators = self.operators.current_multisig().clone();
        let entry = DepositEntry::new(info.deposit_idx, info.outpoint, notary_operators, info.amt)?;
        self.deposits.insert_deposit(entry)?;

        Ok(())
    }

    /// Adds a new withdrawal assignment to the assignments table.
    ///
    /// This retrieves the oldest unassigned deposit UTXO, validates that its amount matches
    /// the withdrawal amount, and creates a withdrawal command with the configured operator fee.
    /// The assignment is then added to the table with operators randomly selected from the
    /// currently active operators.
    ///
    /// # Parameters
    ///
    /// - `withdrawal_output` - The withdrawal output specifying destination and amount
    /// - `l1_block` - The L1 block commitment used for operator selection and deadline calculation
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the withdrawal assignment was successfully added
    /// - `Err(WithdrawalCommandError)` - If no unassigned deposits, amounts mismatch, or adding new
    ///   assignment fails
    pub fn create_withdrawal_assignment(
        &mut self,
        withdrawal_output: &WithdrawOutput,
        l1_block: &L1BlockCommitment,
    ) -> Result<(), WithdrawalCommandError> {
        // Get the oldest deposit
        let deposit = self
            .deposits
            .remove_oldest_deposit()
            .ok_or(WithdrawalCommandError::NoUnassignedDeposits)?;

        if deposit.amt() != withdrawal_output.amt() {
            return Err(WithdrawalCommandError::DepositWithdrawalAmountMismatch(
                Mismatch {
                    expected: deposit.amt().to_sat(),
                    got: withdrawal_output.amt().to_sat(),
                },
            ));
        }

        let withdrawal_cmd = WithdrawalCommand::new(withdrawal_output.clone(), self.operator_fee);

        self.assignments.add_new_assignment(
            deposit,
            withdrawal_cmd,
            self.operators.current_multisig(),
            l1_block,
        )
    }

    /// Processes all expired assignments by reassigning them to new operators.
    ///
    /// This function iterates through all assignments, identifies those that have expired
    /// based on the current Bitcoin block height, and attempts to reassign them to new
    /// operators that haven't been previously assigned to the same withdrawal.
    ///
    /// # Parameters
    ///
    /// - `current_block` - The current L1 block commitment containing height and block hash
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<u32>)` - Vector of deposit indices that were successfully reassigned
    /// - `Err(WithdrawalCommandError)` - If any reassignment fails
    ///
    /// # Notes
    ///
    /// If a reassignment fails for any expired assignment (e.g., no eligible operators
    /// remaining), the function returns an error and stops processing. Successfully
    /// reassigned deposits before the error are returned in the error context if needed.
    pub fn reassign_expired_assignments(
        &mut self,
        current_block: &L1BlockCommitment,
    ) -> Result<Vec<u32>, WithdrawalCommandError> {
        self.assignments
            .reassign_expired_assignments(self.operators.current_multisig(), current_block)
    }

    /// Validates the parsed withdrawal fulfillment information against assignment information.
    ///
    /// This function takes already parsed withdrawal information and validates it
    /// against the corresponding assignment entry. It checks that:
    /// - An assignment exists for the withdrawal's deposit
    /// - The operator performing the withdrawal matches the assigned operator
    /// - The withdrawal amounts and destinations match the assignment specifications
    ///
    /// # Parameters
    ///
    /// - `withdrawal_info` - Parsed withdrawal information containing operator, deposit details,
    ///   and amounts
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the withdrawal is valid according to assignment information
    /// - `Err(WithdrawalValidationError)` - If validation fails for any reason
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No assignment exists for the referenced deposit
    /// - The operator doesn't match the assigned operator
    /// - The withdrawal specifications don't match the assignment
    fn validate_withdrawal_fulfillment(
        &self,
        withdrawal_info: &WithdrawalFulfillmentInfo,
    ) -> Result<(), WithdrawalValidationError> {
        let deposit_idx = withdrawal_info.deposit_idx;

        // Check if an assignment exists for this deposit
        let assignment = self
            .assignments
            .get_assignment(deposit_idx)
            .ok_or(WithdrawalValidationError::NoAssignmentFound { deposit_idx })?;

        // Validate that the operator matches the assignment
        let expected_operator = assignment.current_assignee();
        let actual_operator = withdrawal_info.operator_idx;
        if expected_operator != actual_operator {
            return Err(WithdrawalValidationError::OperatorMismatch(Mismatch {
                expected: expected_operator,
                got: actual_operator,
            }));
        }

        // Validate that the deposit txid matches the assignment
        let expected_txid = assignment.deposit_txid();
        let actual_txid = withdrawal_info.deposit_txid.clone();
        if expected_txid != actual_txid {
            return Err(WithdrawalValidationError::DepositTxidMismatch(Mismatch {
                expected: expected_txid,
                got: actual_txid,
            }));
        }

        // Validate withdrawal amount against assignment command
        let expected_amount = assignment.withdrawal_command().net_amount();
        let actual_amount = withdrawal_info.withdrawal_amount;
        if expected_amount != actual_amount {
            return Err(WithdrawalValidationError::AmountMismatch(Mismatch {
                expected: expected_amount,
                got: actual_amount,
            }));
        }

        // Validate withdrawal destination against assignment command
        let expected_destination = assignment.withdrawal_command().destination().to_script();
        let actual_destination = withdrawal_info.withdrawal_destination.clone();
        if expected_destination != actual_destination {
            return Err(WithdrawalValidationError::DestinationMismatch(Mismatch {
                expected: expected_destination,
                got: actual_destination,
            }));
        }

        Ok(())
    }

    /// Processes a withdrawal fulfillment transaction by validating it, and removing the
    /// assignment from AssignmentTable.
    ///
    /// This function takes already parsed withdrawal transaction information, validates it against
    /// the current state using the assignment table, removes the assignment entry to mark the
    /// withdrawal as fulfilled. The withdrawal processing information is returned to the caller
    /// for storage in MohoState and later use by Bridge proof.
    ///
    /// # Parameters
    ///
    /// - `tx` - The withdrawal fulfillment transaction
    /// - `withdrawal_info` - Parsed withdrawal information containing operator, deposit details,
    ///   and withdrawal amounts
    ///
    /// # Returns
    ///
    /// - `Ok(WithdrawalProcessedInfo)` - The processed withdrawal information if transaction passes
    ///   validation
    /// - `Err(WithdrawalValidationError)` - If validation fails for any reason
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No assignment exists for the referenced deposit
    /// - The operator doesn't match the assigned operator
    /// - The withdrawal specifications don't match the assignment
    /// - The deposit referenced in the withdrawal doesn't exist
    pub fn process_withdrawal_fulfillment_tx(
        &mut self,
        tx: &Transaction,
        withdrawal_info: &WithdrawalFulfillmentInfo,
    ) -> Result<OperatorClaimUnlock, WithdrawalValidationError> {
        self.validate_withdrawal_fulfillment(withdrawal_info)?;

        // Remove the assignment from the table to mark withdrawal as fulfilled
        // Safe to unwrap since validate_withdrawal ensures the assignment exists
        let removed_assignment = self
            .assignments
            .remove_assignment(withdrawal_info.deposit_idx)
            .expect("Assignment must exist after successful validation");

        Ok(OperatorClaimUnlock {
            fulfillment_txid: tx.compute_txid().into(),
            deposit_txid: removed_assignment.deposit_txid(),
            deposit_idx: removed_assignment.deposit_idx(),
            operator_idx: withdrawal_info.operator_idx,
        })
    }
}
