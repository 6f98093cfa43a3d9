//! In-memory upstreams and request helpers for route tests.

use std::sync::Arc;

use alloy_primitives::{Address, address};
use amparo_core::contracts::{ContractRole, ContractSet};
use amparo_core::jitter::FixedJitter;
use amparo_core::ports::{
    ChainCallError, DexAggregator, ImpactPartner, Indexer, InsuranceChain, PartnerCallError,
    ReinsurancePartner, SwapQuoteParams,
};
use amparo_core::pricing::PremiumInput;
use amparo_core::risk::RiskAnswers;
use amparo_core::{Aggregator, Upstreams};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub(crate) const HOLDER: Address = address!("0x1111111111111111111111111111111111111111");
const WEI: u128 = 1_000_000_000_000_000_000;

/// Behaviour of every stubbed read upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upstream {
    Up,
    Down,
    Panics,
}

struct StubChain(Upstream);

impl StubChain {
    fn answer<T>(&self, method: &str, value: T) -> Result<T, ChainCallError> {
        match self.0 {
            Upstream::Up => Ok(value),
            Upstream::Down => Err(ChainCallError::Transport {
                method: method.to_string(),
                message: "connection refused".to_string(),
            }),
            Upstream::Panics => panic!("node client bug in {method}"),
        }
    }
}

#[async_trait]
impl InsuranceChain for StubChain {
    fn chain_id(&self) -> u64 {
        10143
    }

    async fn block_number(&self) -> Result<u64, ChainCallError> {
        self.answer("eth_blockNumber", 1_234)
    }

    async fn gas_price(&self) -> Result<u128, ChainCallError> {
        self.answer("eth_gasPrice", 50_000_000_000)
    }

    async fn network_version(&self) -> Result<String, ChainCallError> {
        self.answer("net_version", "10143".to_string())
    }

    async fn latest_block_transaction_count(&self) -> Result<u64, ChainCallError> {
        self.answer("eth_getBlockTransactionCountByNumber", 7)
    }

    async fn total_policies(&self) -> Result<u128, ChainCallError> {
        self.answer("totalPolicies", 42)
    }

    async fn total_premiums(&self) -> Result<u128, ChainCallError> {
        self.answer("totalPremiums", 1_000 * WEI)
    }

    async fn total_claims(&self) -> Result<u128, ChainCallError> {
        self.answer("totalClaims", 100 * WEI)
    }

    async fn pool_balance(&self) -> Result<u128, ChainCallError> {
        self.answer("getPoolBalance", 900 * WEI)
    }

    async fn policies_of(&self, _holder: Address) -> Result<u128, ChainCallError> {
        self.answer("balanceOf", 2)
    }

    async fn reinsurance_supply(&self) -> Result<u128, ChainCallError> {
        self.answer("totalSupply", 10_000 * WEI)
    }

    async fn calculate_premium(&self, _input: &PremiumInput) -> Result<u128, ChainCallError> {
        self.answer("calculatePremium", 7_500_000_000_000_000_000)
    }

    async fn calculate_risk_score(&self, _answers: &RiskAnswers) -> Result<u64, ChainCallError> {
        self.answer("calculateRiskScore", 64)
    }

    async fn risk_factors(&self, _answers: &RiskAnswers) -> Result<Vec<String>, ChainCallError> {
        self.answer("getRiskFactors", vec!["Hurricane season".to_string()])
    }

    async fn insurance_recommendations(
        &self,
        _answers: &RiskAnswers,
    ) -> Result<Vec<String>, ChainCallError> {
        self.answer("getInsuranceRecommendations", vec!["Add life cover".to_string()])
    }
}

struct StubPartners(Upstream);

impl StubPartners {
    fn answer(&self, partner: &str, value: Value) -> Result<Value, PartnerCallError> {
        match self.0 {
            Upstream::Up => Ok(value),
            Upstream::Down => Err(PartnerCallError::transport(partner, "connection refused")),
            Upstream::Panics => panic!("{partner} client bug"),
        }
    }
}

#[async_trait]
impl Indexer for StubPartners {
    async fn query(&self, query: &str, _variables: Value) -> Result<Value, PartnerCallError> {
        let data = if query.contains("NetworkStats") {
            json!({"NetworkStats": [{"totalTransactions": "98765"}]})
        } else {
            json!({
                "PolicyEvent": [{
                    "id": "evt-1",
                    "eventType": "PremiumPaid",
                    "amount": "6000000000000000000",
                    "timestamp": "1700000000",
                    "transactionHash": "0xfeed"
                }]
            })
        };
        self.answer("indexer", data)
    }
}

#[async_trait]
impl ReinsurancePartner for StubPartners {
    async fn pool_metrics(&self) -> Result<Value, PartnerCallError> {
        self.answer(
            "reinsurance",
            json!({"totalCapacity": 800_000, "utilization": 0.5, "activeTreaties": 4}),
        )
    }
}

#[async_trait]
impl ImpactPartner for StubPartners {
    async fn user_analytics(&self, _address: &str) -> Result<Value, PartnerCallError> {
        self.answer(
            "impact",
            json!({
                "totalCoverage": 10_000,
                "claimsPaid": 250,
                "impactScore": 87.5,
                "beneficiaries": 4
            }),
        )
    }
}

/// DEX partner stub.
#[derive(Debug, Clone)]
pub(crate) enum StubDex {
    /// Echoes requests back in a 2xx body.
    Echo,
    /// Answers every call with this status and body.
    Rejecting(u16, Value),
    /// Fails without an HTTP answer.
    Unreachable,
    /// Fails with this error.
    Failing(PartnerCallError),
}

impl StubDex {
    pub(crate) fn rejecting(status: u16, body: Value) -> Self {
        Self::Rejecting(status, body)
    }

    pub(crate) fn unreachable() -> Self {
        Self::Unreachable
    }

    pub(crate) fn failing(err: PartnerCallError) -> Self {
        Self::Failing(err)
    }

    fn answer(&self, ok: Value) -> Result<Value, PartnerCallError> {
        match self {
            Self::Echo => Ok(ok),
            Self::Rejecting(status, body) => {
                Err(PartnerCallError::status("dex", *status, Some(body.clone())))
            }
            Self::Unreachable => Err(PartnerCallError::transport("dex", "connection refused")),
            Self::Failing(err) => Err(err.clone()),
        }
    }
}

fn echo_params(params: &SwapQuoteParams) -> Value {
    json!({
        "sellToken": params.sell_token,
        "buyToken": params.buy_token,
        "sellAmount": params.sell_amount,
        "taker": params.taker,
    })
}

#[async_trait]
impl DexAggregator for StubDex {
    async fn swap_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError> {
        self.answer(json!({"buyAmount": "990", "echo": echo_params(params)}))
    }

    async fn gasless_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError> {
        self.answer(json!({"buyAmount": "985", "trade": {}, "echo": echo_params(params)}))
    }

    async fn submit_gasless(&self, payload: &Value) -> Result<Value, PartnerCallError> {
        self.answer(json!({"tradeHash": "0xtrade", "received": payload}))
    }

    async fn gasless_status(&self, trade_hash: &str) -> Result<Value, PartnerCallError> {
        self.answer(json!({"status": "confirmed", "tradeHash": trade_hash}))
    }
}

/// Router under test with stubbed upstreams.
pub(crate) struct TestApp {
    pub upstream: Upstream,
    pub dex: StubDex,
    pub contracts: ContractSet,
    pub shutdown: CancellationToken,
}

impl Default for TestApp {
    fn default() -> Self {
        let contracts = ContractRole::ALL
            .into_iter()
            .zip(1u8..)
            .fold(ContractSet::new(10143), |set, (role, byte)| {
                set.with(role, Address::repeat_byte(byte))
            });
        Self {
            upstream: Upstream::Up,
            dex: StubDex::Echo,
            contracts,
            shutdown: CancellationToken::new(),
        }
    }
}

impl TestApp {
    /// Every read upstream unreachable.
    pub(crate) fn offline() -> Self {
        Self {
            upstream: Upstream::Down,
            ..Self::default()
        }
    }

    pub(crate) fn router(self) -> Router {
        let partners = Arc::new(StubPartners(self.upstream));
        let aggregator = Aggregator::new(Upstreams {
            chain: Arc::new(StubChain(self.upstream)),
            indexer: partners.clone(),
            reinsurance: partners.clone(),
            impact: partners,
        })
        .with_jitter(Arc::new(FixedJitter(0)));

        create_router(AppState {
            aggregator: Arc::new(aggregator),
            dex: Arc::new(self.dex),
            contracts: Arc::new(self.contracts),
            platform_tag: Arc::from("amparo"),
            shutdown: self.shutdown,
        })
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, text) = send_raw(router, request).await;
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, body)
}

/// Status, content type and body text of a GET.
pub(crate) async fn get_raw(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    send_raw(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send_raw(router: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub(crate) async fn post_json(router: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}
