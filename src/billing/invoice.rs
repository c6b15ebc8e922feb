use crate::error::BillingError;
use crate::models::*;

impl BillingState {
    /// Build the invoice for `client_id` from the current ledger.
    ///
    /// Line items keep ledger order. The grand total folds the stored
    /// `total` of each line item from left to right. State is not modified.
    pub fn build_invoice(&self, client_id: &str) -> Result<Invoice, BillingError> {
        let client = self.client(client_id)?;

        let line_items: Vec<WorkEntry> = self.logs.for_client(client_id).cloned().collect();
        if line_items.is_empty() {
            return Err(BillingError::NoWorkLogged(client_id.to_string()));
        }

        let grand_total = line_items.iter().fold(0.0, |acc, item| acc + item.total);

        Ok(Invoice {
            issuer: self.profile.clone(),
            bill_to: client.clone(),
            line_items,
            grand_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::billing::DuplicateClientPolicy;

    fn state_with_clients(ids: &[&str]) -> BillingState {
        let mut state = BillingState::default();
        for id in ids {
            state
                .add_client(
                    AddClientInput {
                        id: id.to_string(),
                        name: format!("Client {id}"),
                        email: format!("{id}@example.com"),
                    },
                    DuplicateClientPolicy::Reject,
                )
                .unwrap();
        }
        state
    }

    fn log(state: &mut BillingState, client_id: &str, task: &str, hours: &str, rate: &str) {
        state
            .log_work(
                LogWorkInput {
                    client_id: client_id.to_string(),
                    project: "Site".to_string(),
                    task: task.to_string(),
                    hours: hours.to_string(),
                    rate: rate.to_string(),
                },
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn test_unknown_client() {
        let state = state_with_clients(&["C1"]);
        let err = state.build_invoice("C2").unwrap_err();
        assert!(matches!(err, BillingError::ClientNotFound(id) if id == "C2"));
    }

    #[test]
    fn test_no_work_logged() {
        let state = state_with_clients(&["C1"]);
        let err = state.build_invoice("C1").unwrap_err();
        assert!(matches!(err, BillingError::NoWorkLogged(id) if id == "C1"));
    }

    #[test]
    fn test_filters_to_client_and_keeps_order() {
        let mut state = state_with_clients(&["C1", "C2"]);
        log(&mut state, "C1", "first", "1", "10");
        log(&mut state, "C2", "other", "5", "10");
        log(&mut state, "C1", "second", "2", "10");

        let invoice = state.build_invoice("C1").unwrap();

        let tasks: Vec<_> = invoice.line_items.iter().map(|e| e.task.as_str()).collect();
        assert_eq!(tasks, vec!["first", "second"]);
        assert_eq!(invoice.grand_total, 30.0);
        assert_eq!(invoice.bill_to.id, "C1");
        assert_eq!(invoice.issuer, state.profile);
    }

    #[test]
    fn test_grand_total_is_sequential_sum_of_stored_totals() {
        let mut state = state_with_clients(&["C1"]);
        log(&mut state, "C1", "a", "0.1", "1");
        log(&mut state, "C1", "b", "0.2", "1");
        log(&mut state, "C1", "c", "0.3", "1");

        let invoice = state.build_invoice("C1").unwrap();

        let expected = ((0.0 + 0.1 * 1.0) + 0.2 * 1.0) + 0.3 * 1.0;
        assert_eq!(invoice.grand_total, expected);
    }

    #[test]
    fn test_is_a_pure_read() {
        let mut state = state_with_clients(&["C1"]);
        log(&mut state, "C1", "a", "3", "45.5");
        let before = state.clone();

        let first = state.build_invoice("C1").unwrap();
        let second = state.build_invoice("C1").unwrap();

        assert_eq!(first, second);
        assert_eq!(state, before);
    }
}
