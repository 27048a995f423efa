use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::gateway::{CompletionGateway, GatewayError};
use crate::workflows::intake::{AssessmentImporter, AssessmentTable};
use crate::workflows::report::ReportPromptBuilder;
use crate::workflows::session::repository::{
    SessionId, SessionRecord, SessionStore, SessionStoreError,
};
use crate::workflows::session::AnalysisService;

pub(super) const SAMPLE_CSV: &str = "\
Assessment Taker Name,Dominador Natural,Dominador Work,Influenciador Natural,Influenciador Work,Liderança:,Estética:,Foco no Cliente,Autoconfiança,Confiabilidade (Reliability)
Ana,5,8,6,6.5,8.5,3,7.1,6.2,92
Bruno,3,3.5,7,4,6,7.4,5,8,80
";

pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

pub(super) fn sample_table() -> AssessmentTable {
    AssessmentImporter::from_reader(SAMPLE_CSV.as_bytes()).expect("sample parses")
}

pub(super) fn report_json(parecer: &str) -> String {
    json!({
        "objetivo_analise": "Avaliar aderência à liderança.",
        "data_avaliacao": "01/01/1999",
        "dados_considerados": ["DISC", "Motivadores", "Competências"],
        "profissoes_compativeis": "Gestão de equipes",
        "parecer_geral": parecer,
        "correspondencia_cargo": "Alta",
        "vantagens_fortes": "Foco no cliente",
        "oportunidades_melhoria": "Autoconfiança",
        "analise_disc": "Dominador com adaptação alta.",
        "analise_vieses": "Dados não fornecidos para esta análise",
        "analise_qp": "Dados não fornecidos para esta análise",
        "importante": "Ferramenta de apoio."
    })
    .to_string()
}

/// Replies with queued responses in order and records every prompt it saw.
#[derive(Default)]
pub(super) struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub(super) fn with_replies(
        replies: impl IntoIterator<Item = Result<String, GatewayError>>,
    ) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        self.replies
            .lock()
            .expect("reply mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted reply".to_string())))
    }
}

/// Answers after a delay so overlapping requests interleave. Report prompts
/// get a report naming the person; follow-ups echo the question and take
/// twice as long.
pub(super) struct SlowGateway {
    delay: Duration,
}

impl SlowGateway {
    pub(super) fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CompletionGateway for SlowGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let (reply, delay) = match prompt.rsplit_once("PERGUNTA:\n") {
            Some((_, question)) => (format!("Resposta: {}", question.trim()), self.delay * 2),
            None if prompt.contains("- Nome: Bruno") => (report_json("Parecer Bruno"), self.delay),
            None => (report_json("Parecer Ana"), self.delay),
        };
        tokio::time::sleep(delay).await;
        Ok(reply)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) type TestService = AnalysisService<ScriptedGateway, MemoryStore>;

pub(super) fn build_service(
    replies: impl IntoIterator<Item = Result<String, GatewayError>>,
) -> (TestService, Arc<ScriptedGateway>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let gateway = Arc::new(ScriptedGateway::with_replies(replies));
    let service = AnalysisService::new(
        store.clone(),
        Some(gateway.clone()),
        ReportPromptBuilder::default(),
    );
    (service, gateway, store)
}

pub(super) fn build_offline_service() -> TestService {
    AnalysisService::new(
        Arc::new(MemoryStore::default()),
        None,
        ReportPromptBuilder::default(),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
