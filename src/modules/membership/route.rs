use actix_web::web::{scope, ServiceConfig};

use crate::modules::membership::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/visits").service(record_visit).service(list_visitors));
    cfg.service(scope("/membership").service(upgrade_membership).service(membership_status));
}
