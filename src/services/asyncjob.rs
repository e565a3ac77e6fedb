//! Asyncjob service: job status queries.

use serde::Deserialize;

use crate::command::{Command, sync_response};
use crate::job::Job;
use crate::transport::CommandParams;

/// Parameters for `queryAsyncJobResult`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryAsyncJobResult {
    /// Job to query.
    pub job_id: String,
}

impl QueryAsyncJobResult {
    /// Creates a query for `job_id`.
    #[must_use]
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl Command for QueryAsyncJobResult {
    const NAME: &'static str = "queryAsyncJobResult";
    type Response = Job;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set("jobid", self.job_id.clone());
        params
    }
}

/// Parameters for `listAsyncJobs`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListAsyncJobs {
    /// Restrict to jobs of this account.
    pub account: Option<String>,
    /// Restrict to jobs of this domain.
    pub domain_id: Option<String>,
    /// Only jobs created after this date (`yyyy-MM-dd`).
    pub start_date: Option<String>,
    /// Free-text filter.
    pub keyword: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Page size.
    pub page_size: Option<i64>,
}

impl ListAsyncJobs {
    /// Creates an unfiltered listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account filter.
    #[must_use]
    pub fn account(mut self, value: impl Into<String>) -> Self {
        self.account = Some(value.into());
        self
    }

    /// Sets the domain filter.
    #[must_use]
    pub fn domain_id(mut self, value: impl Into<String>) -> Self {
        self.domain_id = Some(value.into());
        self
    }

    /// Sets the start date filter.
    #[must_use]
    pub fn start_date(mut self, value: impl Into<String>) -> Self {
        self.start_date = Some(value.into());
        self
    }

    /// Sets the keyword filter.
    #[must_use]
    pub fn keyword(mut self, value: impl Into<String>) -> Self {
        self.keyword = Some(value.into());
        self
    }

    /// Sets the page number and size.
    #[must_use]
    pub fn page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

impl Command for ListAsyncJobs {
    const NAME: &'static str = "listAsyncJobs";
    type Response = ListAsyncJobsResponse;

    fn params(&self) -> CommandParams {
        let mut params = CommandParams::new();
        params.set_opt("account", self.account.as_deref());
        params.set_opt("domainid", self.domain_id.as_deref());
        params.set_opt("startdate", self.start_date.as_deref());
        params.set_opt("keyword", self.keyword.as_deref());
        params.set_int("page", self.page);
        params.set_int("pagesize", self.page_size);
        params
    }
}

/// Response of `listAsyncJobs`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListAsyncJobsResponse {
    /// Total number of matching jobs.
    pub count: i64,
    /// Jobs on this page.
    #[serde(rename = "asyncjobs")]
    pub async_jobs: Vec<Job>,
}

sync_response!(ListAsyncJobsResponse);
