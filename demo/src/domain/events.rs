use mediator_macros::domain_event;

#[domain_event]
pub struct EmailSet {
    pub user_id: String,
    pub original_email: String,
    pub new_email: String,
}

#[domain_event]
pub struct EmailChanged {
    pub user_id: String,
    pub original_email: String,
    pub new_email: String,
}

/// KPI 指标
#[domain_event(name = "Kpi")]
pub struct KpiEvent {
    pub action: String,
    pub data: String,
}

#[domain_event]
pub struct NotifySlack {
    pub message: String,
}
