//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::services::{
    AuthService, CategoryService, ClientService, ProductService, SalesService, UserService,
};
use crate::Result;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub categories: CategoryService,
    pub products: ProductService,
    pub clients: ClientService,
    pub sales: SalesService,
    pub users: UserService,
    pub auth: AuthService,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let db = Database::connect(&config.database).await?;
        db.run_migrations().await?;

        let users = UserService::new(db.clone());
        let auth = AuthService::new(users.clone(), config.auth.clone());

        Ok(Self {
            categories: CategoryService::new(db.clone()),
            products: ProductService::new(db.clone()),
            clients: ClientService::new(db.clone()),
            sales: SalesService::new(db.clone()),
            users,
            auth,
            db,
            config: Arc::new(config),
        })
    }
}
