use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use leetdesign::services::grader::{Grader, GraderError, GradingRequest, GradingResult};
use leetdesign::services::mailer::{Mailer, MailerError};

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Keeps every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Code from the most recent message to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let mail = sent.iter().rev().find(|m| m.to == email)?;
        let start = mail.html.find("<strong>")? + "<strong>".len();
        let end = mail.html[start..].find("</strong>")? + start;
        Some(mail.html[start..end].to_string())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Replies with queued results in order; an empty queue is a grader failure
#[derive(Default)]
pub struct ScriptedGrader {
    replies: Mutex<VecDeque<Result<GradingResult, GraderError>>>,
    requests: Mutex<Vec<GradingRequest>>,
}

#[allow(dead_code)]
impl ScriptedGrader {
    pub fn push_score(&self, match_percentage: f64, feedback: &str) {
        self.replies.lock().unwrap().push_back(Ok(GradingResult {
            match_percentage,
            feedback: feedback.to_string(),
        }));
    }

    pub fn push_failure(&self, error: GraderError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<GradingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Grader for ScriptedGrader {
    async fn evaluate(&self, request: &GradingRequest) -> Result<GradingResult, GraderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GraderError::EmptyResponse))
    }
}
