use serde::{Deserialize, Serialize};

/// First assistant turn of every freshly generated report.
pub const GREETING: &str = "Relatório gerado. Posso responder perguntas sobre a análise do(a) \
Avaliado(a), como pontos fortes, riscos de adaptação DISC ou sugestões de desenvolvimento.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Usuário",
            Self::Assistant => "Assistente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only record of one analysis conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationTranscript {
    turns: Vec<ConversationTurn>,
}

impl ConversationTranscript {
    pub(crate) fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

pub(crate) fn failure_message(detail: &impl std::fmt::Display) -> String {
    format!("Desculpe, não consegui obter uma resposta da IA agora ({detail}). Tente novamente.")
}
