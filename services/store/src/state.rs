use sea_orm::DatabaseConnection;

use crate::changes::ChangeFeed;
use crate::domain::types::RootIdentity;
use crate::infra::db::{
    DbAdminRepository, DbCartRepository, DbOrderRepository, DbProductRepository,
    DbUserRepository,
};
use crate::usecase::access::AccessPolicy;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub root: RootIdentity,
    pub changes: ChangeFeed,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn cart_repo(&self) -> DbCartRepository {
        DbCartRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn admin_repo(&self) -> DbAdminRepository {
        DbAdminRepository {
            db: self.db.clone(),
        }
    }

    pub fn access(&self) -> AccessPolicy<DbUserRepository, DbAdminRepository> {
        AccessPolicy {
            users: self.user_repo(),
            admins: self.admin_repo(),
            root: self.root.clone(),
        }
    }
}
