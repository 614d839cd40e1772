use std::sync::Arc;

use bitcoin::{Block, hashes::Hash};
use strata_asm_common::{AnchorState, AsmHistoryAccumulatorState, ChainViewState};
use strata_asm_spec::StrataAsmSpec;
use strata_asm_stf::{AsmStfInput, AsmStfOutput};
use strata_asm_types::HeaderVerificationState;
use strata_params::RollupParams;
use strata_primitives::{Buf32, l1::L1BlockCommitment};
use strata_service::ServiceState;
use strata_state::asm_state::AsmState;
use tracing::field::Empty;

use crate::{WorkerContext, WorkerError, WorkerResult, aux_resolver::AuxDataResolver, constants};

/// Service state for the ASM worker.
///
/// TODO: additional fields and bookkeeping related to STF version and storing aux inputs.
#[derive(Debug)]
pub struct AsmWorkerServiceState<W> {
    /// Params.
    pub(crate) params: Arc<RollupParams>,

    /// Context for the state to interact with outer world.
    pub(crate) context: W,

    /// Whether the service is initialized.
    pub initialized: bool,

    /// Current ASM state.
    pub anchor: Option<AsmState>,

    /// Current anchor block.
    pub blkid: Option<L1BlockCommitment>,

    /// ASM spec for ASM STF.
    asm_spec: StrataAsmSpec,
}

impl<W: WorkerContext + Send + Sync + 'static> AsmWorkerServiceState<W> {
    /// A new (uninitialized) instance of the service state.
    pub fn new(context: W, params: Arc<RollupParams>) -> Self {
        let asm_spec = StrataAsmSpec::from_params(&params);
        Self {
            params,
            context,
            anchor: None,
            blkid: None,
            initialized: false,
            asm_spec,
        }
    }

    /// Loads and sets the latest anchor state.
    ///
    /// If there are no anchor states yet, creates and stores genesis one beforehand.
    pub fn load_latest_or_create_genesis(&mut self) -> WorkerResult<()> {
        match self.context.get_latest_asm_state()? {
            Some((blkid, state)) => {
                self.update_anchor_state(state, blkid);
                Ok(())
            }
            None => {
                // Create genesis anchor state.
                let genesis_l1_view = &self.params.genesis_l1_view;
                let empty_accumulator =
                    AsmHistoryAccumulatorState::new(genesis_l1_view.height_u64());
                let state = AnchorState {
                    chain_view: ChainViewState {
                        pow_state: HeaderVerificationState::new(
                            self.context.get_network()?,
                            genesis_l1_view,
                        ),
                        history_accumulator: empty_accumulator,
                    },
                    sections: vec![],
                };

                // Persist it and update state.
                let state = AsmState::new(state, vec![]);
                self.context
                    .store_anchor_state(&genesis_l1_view.blk, &state)?;
                self.update_anchor_state(state, genesis_l1_view.blk);

                Ok(())
            }
        }
    }

    /// Returns the actual ASM STF results: a Bitcoin block is applied onto current anchor state.
    ///
    /// A caller is responsible for ensuring the current anchor is a parent of a passed block.
    pub fn transition(&self, block: &Block) -> WorkerResult<AsmStfOutput> {
        let cur_state = self.anchor.as_ref().expect("state should be set before");

        // Pre process transition next block against current anchor state.
        let pre_process = {
            let span = tracing::debug_span!("asm.stf.pre_process", protocol_txs = Empty);
            let _guard = span.enter();

            let result = strata_asm_stf::pre_process_asm(&self.asm_spec, cur_state.state(), block)
                .map_err(WorkerError::AsmError)?;

            span.record("protocol_txs", result.txs.len());
            result
        };

        // Resolve auxiliary data requests from subprotocols
        let aux_data = {
            let span = tracing::debug_span!("asm.stf.aux_resolve");
            let _guard = span.enter();

            let resolver = AuxDataResolver::new(&self.context, self.params.clone());
            resolver.resolve(&pre_process.aux_requests)?
        };

        // For blocks without witness data (pre-SegWit or legacy-only transactions),
        // the witness merkle root equals the transaction merkle root per Bitcoin protocol.
        let wtxids_root: Buf32 = block
            .witness_root()
            .map(|root| root.as_raw_hash().to_byte_array())
            .unwrap_or_else(|| block.header.merkle_root.as_raw_hash().to_byte_array())
            .into();

        let stf_input = AsmStfInput {
            protocol_txs: pre_process.txs,
            header: &block.header,
            wtxids_root,
            aux_data,
        };

        // Asm transition.
        let stf_span = tracing::debug_span!("asm.stf.process");
        let _stf_guard = stf_span.enter();

        strata_asm_stf::compute_asm_transition(&self.asm_spec, cur_state.state(), stf_input)
            .map_err(WorkerError::AsmError)
    }

    /// Updates anchor related bookkeping.
    pub(crate) fn update_anchor_state(&mut self, anchor: AsmState, blkid: L1BlockCommitment) {
        self.initialized = true;
        self.anchor = Some(anchor);
        self.blkid = Some(blkid);
    }
}

impl<W: WorkerContext + Send + Sync + 'static> ServiceState for AsmWorkerServiceState<W> {
    fn name(&self) -> &str {
        constants::SERVICE_NAME
    }
}
