mod common;
mod donations;
mod drafts;
mod policy;
mod valuation;
