//! Upload-and-submit workflow as explicit state driven by commands.

use defold_core::SequenceRecord;
use defold_formats::fasta;
use log::{info, warn};
use serde::Serialize;

use crate::{
    Address, DataId, GenomicDataContract, GenomicDataSubmission, MarketError, Result,
    SubmissionConfig,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A file was dropped or picked; `content` is its decoded text.
    LoadFile { file_name: String, content: String },
    SetTitle(String),
    Submit,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    #[default]
    Idle,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Loaded { records: usize },
    TitleSet,
    Submitted { data_ids: Vec<DataId> },
    Reset,
}

/// State of one account's upload session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    account: Address,
    config: SubmissionConfig,
    file_name: Option<String>,
    records: Vec<SequenceRecord>,
    title: String,
    status: TxStatus,
}

impl Dashboard {
    pub fn new(account: Address, config: SubmissionConfig) -> Self {
        Self {
            account,
            config,
            file_name: None,
            records: Vec::new(),
            title: String::new(),
            status: TxStatus::Idle,
        }
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TxStatus {
        self.status
    }

    pub fn dispatch<C: GenomicDataContract>(
        &mut self,
        contract: &mut C,
        command: Command,
    ) -> Result<Outcome> {
        match command {
            Command::LoadFile { file_name, content } => {
                self.records = fasta::parse(&content);
                self.file_name = Some(file_name);
                self.status = TxStatus::Idle;
                Ok(Outcome::Loaded {
                    records: self.records.len(),
                })
            }
            Command::SetTitle(title) => {
                self.title = title.trim().to_string();
                Ok(Outcome::TitleSet)
            }
            Command::Submit => self.submit(contract),
            Command::Reset => {
                *self = Self::new(self.account.clone(), self.config.clone());
                Ok(Outcome::Reset)
            }
        }
    }

    fn submit<C: GenomicDataContract>(&mut self, contract: &mut C) -> Result<Outcome> {
        if self.file_name.is_none() {
            return Err(MarketError::NoFileSelected);
        }
        if self.title.is_empty() {
            return Err(MarketError::MissingTitle);
        }
        if self.records.is_empty() {
            return Err(MarketError::NoRecords);
        }

        let mut data_ids = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let submission = GenomicDataSubmission::from_record(record, &self.config, &self.title);
            match contract.submit_genomic_data(&self.account, &submission) {
                Ok(id) => data_ids.push(id),
                Err(e) => {
                    warn!("submission of {} failed: {}", record.header, e);
                    self.status = TxStatus::Failure;
                    return Err(e);
                }
            }
        }

        info!("submitted {} records as '{}'", data_ids.len(), self.title);
        self.status = TxStatus::Success;
        Ok(Outcome::Submitted { data_ids })
    }
}
