#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{watch, Notify};

use polysui::instructions::TransactionRequest;
use polysui::rpc::{
    ChainClient, ObjectChange, SuiObjectData, SuiObjectResponse, SuiParsedData,
    TransactionBlockResponse,
};
use polysui::{ExecutedTransaction, NetworkConfig, ObjectId, RpcError, Wallet, WalletFailure};

pub const ALICE: &str = "0x00000000000000000000000000000000000000000000000000000000000a11ce";
pub const BOB: &str = "0x0000000000000000000000000000000000000000000000000000000000000b0b";
pub const NOW: u64 = 1_700_000_000_000;

pub fn package() -> ObjectId {
    ObjectId::new([0xab; 32])
}

pub fn market_id() -> ObjectId {
    ObjectId::new([0x4d; 32])
}

pub fn cfg() -> Arc<NetworkConfig> {
    Arc::new(NetworkConfig::testnet(package()))
}

pub struct MarketFields {
    pub options: Vec<&'static str>,
    pub votes: Vec<u64>,
    pub deadline: u64,
    pub whitelist_enabled: bool,
    pub initial_voters: Vec<&'static str>,
    pub voters: Vec<&'static str>,
    pub creator: &'static str,
}

impl Default for MarketFields {
    fn default() -> Self {
        Self {
            options: vec!["A", "B"],
            votes: vec![3, 1],
            deadline: NOW + 3_600_000,
            whitelist_enabled: false,
            initial_voters: vec![],
            voters: vec![],
            creator: ALICE,
        }
    }
}

impl MarketFields {
    pub fn to_json(&self, id: &ObjectId) -> Value {
        json!({
            "id": { "id": id.to_string() },
            "question": "Which one?",
            "options": self.options,
            "votes": self.votes.iter().map(u64::to_string).collect::<Vec<_>>(),
            "deadline": self.deadline.to_string(),
            "whitelist_enabled": self.whitelist_enabled,
            "initial_voters": self.initial_voters,
            "voters": self.voters,
            "creator": self.creator,
        })
    }
}

pub fn market_object(cfg: &NetworkConfig, id: &ObjectId, fields: &MarketFields) -> SuiObjectResponse {
    typed_object(id, &cfg.market_type(), fields.to_json(id))
}

pub fn typed_object(id: &ObjectId, object_type: &str, fields: Value) -> SuiObjectResponse {
    SuiObjectResponse {
        data: Some(SuiObjectData {
            object_id: id.to_string(),
            object_type: Some(object_type.to_string()),
            content: Some(SuiParsedData::MoveObject {
                object_type: object_type.to_string(),
                fields,
            }),
        }),
    }
}

pub fn missing_object() -> SuiObjectResponse {
    SuiObjectResponse {
        data: None,
    }
}

pub fn created_block(digest: &str, created: &[(ObjectId, String)]) -> TransactionBlockResponse {
    TransactionBlockResponse {
        digest: digest.to_string(),
        object_changes: Some(
            created
                .iter()
                .map(|(id, object_type)| ObjectChange::Created {
                    object_id: id.to_string(),
                    object_type: object_type.clone(),
                })
                .collect(),
        ),
    }
}

/// In-memory node. Unknown ids and digests answer with an rpc error.
#[derive(Default)]
pub struct MockChain {
    objects: Mutex<HashMap<ObjectId, SuiObjectResponse>>,
    blocks: Mutex<HashMap<String, TransactionBlockResponse>>,
    read_gate: Mutex<Option<Arc<Notify>>>,
    pub object_reads: AtomicUsize,
    pub block_reads: AtomicUsize,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put_object(&self, id: ObjectId, response: SuiObjectResponse) {
        self.objects.lock().unwrap().insert(id, response);
    }

    pub fn remove_object(&self, id: &ObjectId) {
        self.objects.lock().unwrap().remove(id);
    }

    pub fn put_block(&self, block: TransactionBlockResponse) {
        self.blocks.lock().unwrap().insert(block.digest.clone(), block);
    }

    /// The next object read holds its answer until the returned handle is notified.
    pub fn hold_next_read(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.read_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn object_reads(&self) -> usize {
        self.object_reads.load(Ordering::SeqCst)
    }

    pub fn block_reads(&self) -> usize {
        self.block_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_object(&self, id: &ObjectId) -> Result<SuiObjectResponse, RpcError> {
        self.object_reads.fetch_add(1, Ordering::SeqCst);
        let answer = self.objects.lock().unwrap().get(id).cloned();
        let gate = self.read_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        answer.ok_or_else(|| RpcError::Rpc {
            code: -32000,
            message: "connection refused".into(),
        })
    }

    async fn get_transaction_block(
        &self,
        digest: &str,
    ) -> Result<TransactionBlockResponse, RpcError> {
        self.block_reads.fetch_add(1, Ordering::SeqCst);
        self.blocks
            .lock()
            .unwrap()
            .get(digest)
            .cloned()
            .ok_or_else(|| RpcError::Rpc {
                code: -32602,
                message: format!("Could not find the referenced transaction [{digest}]"),
            })
    }
}

/// Wallet answering from a script of results, recording every request.
pub struct MockWallet {
    account: watch::Sender<Option<String>>,
    script: Mutex<VecDeque<Result<ExecutedTransaction, WalletFailure>>>,
    gate: Mutex<Option<Arc<Notify>>>,
    pub requests: Mutex<Vec<TransactionRequest>>,
}

impl MockWallet {
    pub fn connected(address: &str) -> Arc<Self> {
        Self::with_account(Some(address.to_string()))
    }

    pub fn disconnected() -> Arc<Self> {
        Self::with_account(None)
    }

    fn with_account(account: Option<String>) -> Arc<Self> {
        let (account, _) = watch::channel(account);
        Arc::new(Self {
            account,
            script: Mutex::new(VecDeque::new()),
            gate: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn switch_account(&self, account: Option<&str>) {
        self.account.send_replace(account.map(str::to_string));
    }

    pub fn succeed(&self, digest: &str) {
        self.script.lock().unwrap().push_back(Ok(ExecutedTransaction {
            digest: digest.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(WalletFailure::message(message)));
    }

    /// The next signature waits until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn account(&self) -> watch::Receiver<Option<String>> {
        self.account.subscribe()
    }

    async fn sign_and_execute(
        &self,
        request: &TransactionRequest,
    ) -> Result<ExecutedTransaction, WalletFailure> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WalletFailure::message("no scripted response")))
    }
}
