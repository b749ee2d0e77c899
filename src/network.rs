use crate::client::{ChainClient, GraphQlClient};
use crate::constants::{
    BLOCK_FETCH_INTERVAL, MAX_BLOCKS_TO_KEEP, MAX_TXNS_TO_KEEP, STATUS_CHECK_INTERVAL, TICK_RATE,
    TXN_FETCH_INTERVAL,
};
use crate::domain::{BlockInfo, Cluster, Transaction};
use crate::event::NetworkUpdateEvent;
use crate::search::{SearchEngine, SearchQuery};
use color_eyre::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Duration, sleep};

/// Manages background network tasks.
///
/// Owns the shared clients and the polling loop. Searches are stamped
/// with a monotonically increasing sequence number so the app can discard
/// stale responses (last writer wins), and polling cycles skip rather
/// than queue when a previous fetch is still unresolved.
pub struct NetworkManager {
    chain: Arc<Mutex<ChainClient>>,
    engine: Arc<Mutex<SearchEngine<GraphQlClient>>>,
    show_live: Arc<Mutex<bool>>,
    blocks: Arc<Mutex<Vec<BlockInfo>>>,
    transactions: Arc<Mutex<Vec<Transaction>>>,
    runtime: tokio::runtime::Handle,
    network_event_sender: mpsc::Sender<NetworkUpdateEvent>,
    search_seq: Arc<AtomicU64>,
    poll_in_flight: Arc<AtomicBool>,
}

impl NetworkManager {
    /// Creates a new NetworkManager.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain: Arc<Mutex<ChainClient>>,
        engine: Arc<Mutex<SearchEngine<GraphQlClient>>>,
        show_live: Arc<Mutex<bool>>,
        blocks: Arc<Mutex<Vec<BlockInfo>>>,
        transactions: Arc<Mutex<Vec<Transaction>>>,
        runtime: tokio::runtime::Handle,
        network_event_sender: mpsc::Sender<NetworkUpdateEvent>,
    ) -> Self {
        Self {
            chain,
            engine,
            show_live,
            blocks,
            transactions,
            runtime,
            network_event_sender,
            search_seq: Arc::new(AtomicU64::new(0)),
            poll_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the main background loop for fetching data and checking
    /// status. The returned handle is owned by the caller; aborting it on
    /// teardown is what stops the loop.
    pub fn start_background_loop(&self) -> tokio::task::JoinHandle<()> {
        let chain = Arc::clone(&self.chain);
        let show_live = Arc::clone(&self.show_live);
        let blocks = Arc::clone(&self.blocks);
        let transactions = Arc::clone(&self.transactions);
        let in_flight = Arc::clone(&self.poll_in_flight);
        let runtime = self.runtime.clone();
        let sender = self.network_event_sender.clone();

        runtime.spawn(async move {
            let mut last_txn_fetch = Instant::now();
            let mut last_block_fetch = Instant::now();
            let mut last_status_check = Instant::now();
            let mut is_cluster_available = true;
            let mut cluster_error_shown = false;

            loop {
                if !*show_live.lock().await {
                    cluster_error_shown = false;
                    sleep(Duration::from_secs(1)).await;
                    continue;
                }

                let now = Instant::now();
                let status_due = now.duration_since(last_status_check) >= STATUS_CHECK_INTERVAL;
                let blocks_due = now.duration_since(last_block_fetch) >= BLOCK_FETCH_INTERVAL;
                let txns_due = now.duration_since(last_txn_fetch) >= TXN_FETCH_INTERVAL;

                if !(status_due || blocks_due || txns_due) {
                    sleep(TICK_RATE / 2).await;
                    continue;
                }

                // Skip the cycle entirely if another fetch is unresolved;
                // queueing would let slow responses pile up unboundedly.
                if in_flight
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    sleep(TICK_RATE / 2).await;
                    continue;
                }

                let current_client = chain.lock().await.clone();

                if status_due {
                    last_status_check = now;
                    let status_result = current_client.get_cluster_status().await;

                    match &status_result {
                        Ok(_) => {
                            if !is_cluster_available {
                                let _ = sender
                                    .send(NetworkUpdateEvent::StatusUpdate(status_result.clone()))
                                    .await;
                            }
                            is_cluster_available = true;
                            cluster_error_shown = false;
                        }
                        Err(_) => {
                            if !cluster_error_shown {
                                let _ = sender
                                    .send(NetworkUpdateEvent::StatusUpdate(status_result.clone()))
                                    .await;
                                cluster_error_shown = true;
                            }
                            is_cluster_available = false;
                        }
                    }

                    if !is_cluster_available {
                        in_flight.store(false, Ordering::SeqCst);
                        sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                }

                if is_cluster_available && blocks_due {
                    last_block_fetch = now;
                    let blocks_result = fetch_and_update_blocks(
                        &current_client,
                        Arc::clone(&blocks),
                        MAX_BLOCKS_TO_KEEP,
                    )
                    .await;

                    if blocks_result.is_err() {
                        last_status_check = Instant::now()
                            .checked_sub(STATUS_CHECK_INTERVAL * 2)
                            .unwrap_or_else(Instant::now);
                    }
                    let event_payload = blocks_result.map_err(|e| format!("{}", e));
                    let _ = sender
                        .send(NetworkUpdateEvent::BlocksFetched(event_payload))
                        .await;
                }

                if is_cluster_available && txns_due {
                    last_txn_fetch = now;
                    let txns_result = fetch_and_update_transactions(
                        &current_client,
                        Arc::clone(&transactions),
                        MAX_TXNS_TO_KEEP,
                    )
                    .await;

                    if txns_result.is_err() {
                        last_status_check = Instant::now()
                            .checked_sub(STATUS_CHECK_INTERVAL * 2)
                            .unwrap_or_else(Instant::now);
                    }
                    let event_payload = txns_result.map_err(|e| format!("{}", e));
                    let _ = sender
                        .send(NetworkUpdateEvent::TransactionsFetched(event_payload))
                        .await;
                }

                in_flight.store(false, Ordering::SeqCst);
                sleep(TICK_RATE / 2).await;
            }
        })
    }

    /// Fetches initial data (status, blocks, transactions) when the app
    /// starts or the cluster changes.
    pub fn fetch_initial_data(&self) {
        let chain = Arc::clone(&self.chain);
        let blocks = Arc::clone(&self.blocks);
        let transactions = Arc::clone(&self.transactions);
        let in_flight = Arc::clone(&self.poll_in_flight);
        let runtime = self.runtime.clone();
        let sender = self.network_event_sender.clone();

        runtime.spawn(async move {
            if in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                tracing::debug!("initial fetch skipped, another fetch is in flight");
                return;
            }

            let current_client = chain.lock().await.clone();
            fetch_all(&current_client, blocks, transactions, &sender).await;
            in_flight.store(false, Ordering::SeqCst);
        });
    }

    /// Dispatches a search and returns the sequence number stamped on it.
    ///
    /// The caller records the returned number; results arriving with an
    /// older stamp are stale and must be discarded.
    pub fn search(&self, query: SearchQuery) -> u64 {
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let engine = Arc::clone(&self.engine);
        let runtime = self.runtime.clone();
        let sender = self.network_event_sender.clone();

        runtime.spawn(async move {
            let current_engine = engine.lock().await.clone();
            let outcome = current_engine
                .search(&query)
                .await
                .map_err(|e| e.user_message());
            let _ = sender
                .send(NetworkUpdateEvent::SearchResults { seq, outcome })
                .await;
        });

        seq
    }

    /// Fetches validator vote and performance history for a vote account.
    ///
    /// Independent of search state: a failure here degrades to the base
    /// account view and never touches classified results.
    pub fn fetch_validator_details(&self, address: String) {
        let chain = Arc::clone(&self.chain);
        let runtime = self.runtime.clone();
        let sender = self.network_event_sender.clone();

        runtime.spawn(async move {
            let current_client = chain.lock().await.clone();
            let outcome = current_client
                .get_validator_details(&address)
                .await
                .map_err(|e| e.user_message());
            let _ = sender
                .send(NetworkUpdateEvent::ValidatorDetailsFetched { address, outcome })
                .await;
        });
    }

    /// Rebuilds the clients for a new cluster and refetches data.
    pub fn switch_cluster(
        &self,
        new_cluster: Cluster,
    ) -> impl std::future::Future<Output = ()> + Send + 'static {
        let chain_arc = Arc::clone(&self.chain);
        let engine_arc = Arc::clone(&self.engine);
        let blocks_arc = Arc::clone(&self.blocks);
        let transactions_arc = Arc::clone(&self.transactions);
        let sender = self.network_event_sender.clone();

        async move {
            let new_chain = match ChainClient::new(&new_cluster) {
                Ok(client) => client,
                Err(e) => {
                    let _ = sender
                        .send(NetworkUpdateEvent::StatusUpdate(Err(e.user_message())))
                        .await;
                    return;
                }
            };
            let new_engine = SearchEngine::new(new_chain.graphql().clone());

            {
                let mut chain_lock = chain_arc.lock().await;
                *chain_lock = new_chain.clone();
            }
            {
                let mut engine_lock = engine_arc.lock().await;
                *engine_lock = new_engine;
            }

            clear_data(Arc::clone(&blocks_arc), Arc::clone(&transactions_arc)).await;
            fetch_all(&new_chain, blocks_arc, transactions_arc, &sender).await;
        }
    }

    /// Spawns a future onto the NetworkManager's runtime.
    pub fn spawn_task<F>(&self, future: F)
    where
        F: std::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(future);
    }
}

/// Runs the full status + blocks + transactions fetch sequence.
async fn fetch_all(
    client: &ChainClient,
    blocks_arc: Arc<Mutex<Vec<BlockInfo>>>,
    transactions_arc: Arc<Mutex<Vec<Transaction>>>,
    sender: &mpsc::Sender<NetworkUpdateEvent>,
) {
    let status_result = client.get_cluster_status().await;
    let status_ok = status_result.is_ok();
    let _ = sender
        .send(NetworkUpdateEvent::StatusUpdate(status_result))
        .await;

    if !status_ok {
        return;
    }

    let blocks_result =
        fetch_and_update_blocks(client, Arc::clone(&blocks_arc), MAX_BLOCKS_TO_KEEP).await;
    let _ = sender
        .send(NetworkUpdateEvent::BlocksFetched(
            blocks_result.map_err(|e| format!("{}", e)),
        ))
        .await;

    let txns_result =
        fetch_and_update_transactions(client, Arc::clone(&transactions_arc), MAX_TXNS_TO_KEEP)
            .await;
    let _ = sender
        .send(NetworkUpdateEvent::TransactionsFetched(
            txns_result.map_err(|e| format!("{}", e)),
        ))
        .await;
}

/// Fetches the latest blocks and merges them into the shared state.
async fn fetch_and_update_blocks(
    client: &ChainClient,
    blocks_arc: Arc<Mutex<Vec<BlockInfo>>>,
    max_blocks: usize,
) -> Result<Vec<BlockInfo>> {
    let new_blocks = client.get_latest_blocks(5).await?;
    if new_blocks.is_empty() {
        return Ok(Vec::new());
    }

    let mut blocks = blocks_arc.lock().await;

    // Merge new blocks while maintaining descending slot order
    let existing_slots: HashSet<u64> = blocks.iter().map(|b| b.slot).collect();
    let mut added_blocks = Vec::new();

    for new_block in new_blocks {
        if !existing_slots.contains(&new_block.slot) {
            let pos = blocks.partition_point(|b| b.slot > new_block.slot);
            blocks.insert(pos, new_block.clone());
            added_blocks.push(new_block);
        }
    }

    if blocks.len() > max_blocks {
        blocks.truncate(max_blocks);
    }

    Ok(added_blocks)
}

/// Fetches the latest transactions and merges them into the shared state.
async fn fetch_and_update_transactions(
    client: &ChainClient,
    transactions_arc: Arc<Mutex<Vec<Transaction>>>,
    max_txns: usize,
) -> Result<Vec<Transaction>> {
    let new_txns = client.get_latest_transactions(5).await?;
    if new_txns.is_empty() {
        return Ok(Vec::new());
    }

    let mut txns = transactions_arc.lock().await;

    let existing_sigs: HashSet<String> =
        txns.iter().map(|t| t.signature().to_string()).collect();
    let mut added_txns = Vec::new();

    // Prepend new, unique transactions in feed order
    for new_txn in new_txns.into_iter().rev() {
        if !existing_sigs.contains(new_txn.signature()) {
            txns.insert(0, new_txn.clone());
            added_txns.push(new_txn);
        }
    }

    if txns.len() > max_txns {
        txns.truncate(max_txns);
    }

    Ok(added_txns.into_iter().rev().collect())
}

/// Clears shared data, keeping lock scopes minimal.
async fn clear_data(
    blocks_arc: Arc<Mutex<Vec<BlockInfo>>>,
    transactions_arc: Arc<Mutex<Vec<Transaction>>>,
) {
    {
        let mut blocks = blocks_arc.lock().await;
        blocks.clear();
    }
    {
        let mut transactions = transactions_arc.lock().await;
        transactions.clear();
    }
}
