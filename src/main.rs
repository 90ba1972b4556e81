//! Clubpass server entrypoint: configuration, wiring, and the axum listener.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clubpass::adapters::apple::{ApplePassSigner, AppleSigningCredentials};
use clubpass::adapters::google::{GoogleWalletClient, ServiceAccountAuth};
use clubpass::adapters::http::{api_routes, ApiHandlers};
use clubpass::adapters::images::ReqwestImageFetcher;
use clubpass::adapters::storage::{BucketRosterStore, FsRosterStore};
use clubpass::application::class_manager::WalletClassManager;
use clubpass::application::handlers::{IssuePassHandler, UploadRosterHandler};
use clubpass::config::{AppConfig, StorageBackend};
use clubpass::domain::club::ClubRegistry;
use clubpass::domain::credential::CredentialVerifier;
use clubpass::domain::wallet::{AppleIdentifiers, SaveUrlSigner};
use clubpass::ports::{ApplePassGenerator, RosterStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = Arc::new(ClubRegistry::from_yaml_file(&config.clubs_file)?);
    if registry.is_empty() {
        tracing::warn!(file = %config.clubs_file, "club registry is empty, every issuance will be rejected");
    }
    tracing::info!(clubs = registry.len(), file = %config.clubs_file, "club registry loaded");

    let roster_store: Arc<dyn RosterStore> = match config.storage.backend {
        StorageBackend::Filesystem => Arc::new(FsRosterStore::new(&config.storage.base_dir)),
        StorageBackend::Bucket => {
            // validate() guarantees both values for the bucket backend.
            let bucket_url = config.storage.bucket_url.clone().ok_or("bucket_url missing")?;
            let service_key = config
                .storage
                .service_key
                .clone()
                .ok_or("storage service_key missing")?;
            Arc::new(BucketRosterStore::new(
                bucket_url,
                config.storage.bucket_name.clone(),
                service_key,
            ))
        }
    };

    let google_key = config.google.private_key();
    let auth = Arc::new(ServiceAccountAuth::new(
        config.google.service_account_email.clone(),
        &google_key,
    )?);
    let wallet_client = Arc::new(GoogleWalletClient::new(auth));
    let class_manager = Arc::new(WalletClassManager::new(wallet_client.clone()));
    let save_signer = Arc::new(SaveUrlSigner::new(
        config.google.service_account_email.clone(),
        &google_key,
        config.google.origins_list(),
    )?);

    let apple_generator: Option<Arc<dyn ApplePassGenerator>> = match config.apple.bundle() {
        Some(bundle) => {
            let signer = ApplePassSigner::new(
                AppleIdentifiers {
                    pass_type_identifier: bundle.pass_type_identifier,
                    team_identifier: bundle.team_identifier,
                },
                &AppleSigningCredentials {
                    signer_certificate_pem: bundle.certificate_pem,
                    signer_key_pem: bundle.key_pem,
                    wwdr_certificate_pem: bundle.wwdr_certificate_pem,
                },
                Arc::new(ReqwestImageFetcher::new()?),
            )?;
            tracing::info!("apple wallet signing enabled");
            Some(Arc::new(signer))
        }
        None => {
            tracing::info!("apple wallet signing not configured, passes will be google-only");
            None
        }
    };

    let verifier = CredentialVerifier::new(roster_store.clone());
    let issue_handler = Arc::new(IssuePassHandler::new(
        registry.clone(),
        verifier,
        WalletClassManager::new(wallet_client),
        save_signer,
        config.google.issuer_id.clone(),
        apple_generator,
    ));
    let upload_handler = Arc::new(UploadRosterHandler::new(registry, roster_store));

    let handlers = ApiHandlers::new(
        issue_handler,
        upload_handler,
        class_manager,
        config.google.issuer_id.as_str(),
    );
    let app = api_routes(
        handlers,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
