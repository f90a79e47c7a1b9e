//! Debt Pages Library
//!
//! Server-rendered pages that fetch JSON from the debt API and render a
//! debt-payoff summary or a greeting, plus the debt API itself with its
//! repayment simulator.
//!
//! # Modules
//!
//! - `api`: HTTP handlers and routers.
//! - `core`: Page rendering, repayment simulation and shared errors/models.
//! - `integrations`: Outbound debt API client.
//! - `obs`: Observability and logging.
//! - `api_client`: Client for the debt API.
//! - `api_handlers`: Debt API handlers (`/api/hello`, `/api/data`).
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: Page handlers.
//! - `models`: Response shapes the pages consume.
//! - `pages`: Fragment rendering.
//! - `portfolio`: Debts, outgoings and income.
//! - `routes`: Router construction.
//! - `simulator`: Avalanche/snowball repayment simulation.

pub mod api;
pub mod core;
pub mod integrations;
pub mod obs;

pub mod api_client;
pub mod api_handlers;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod portfolio;
pub mod routes;
pub mod simulator;
