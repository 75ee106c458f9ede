//! CSV export of a (typically filtered) installment set.

use crate::errors::Result;
use crate::schedule::{ComputedStatus, ScheduleItem};

fn status_label(status: ComputedStatus) -> &'static str {
    match status {
        ComputedStatus::EnAttente => "en_attente",
        ComputedStatus::Paye => "paye",
        ComputedStatus::EnRetard => "en_retard",
    }
}

/// Renders one CSV row per schedule item, header included.
pub fn schedule_csv(items: &[ScheduleItem]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "project",
        "tranche",
        "investor",
        "advisor",
        "due_date",
        "gross_amount",
        "net_amount",
        "status",
        "paid_date",
        "paid_amount",
    ])?;

    for item in items {
        let inst = &item.installment;
        writer.write_record([
            inst.project_name.as_str(),
            inst.tranche_name.as_str(),
            inst.investor_name.as_str(),
            inst.advisor_name.as_deref().unwrap_or(""),
            &inst.due_date.to_string(),
            &inst.gross_amount.to_string(),
            &inst.net_amount.to_string(),
            status_label(item.computed_status),
            &inst
                .paid_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            &inst
                .paid_amount
                .map(|a| a.to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::Error::Report(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CouponInstallment, InstallmentStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(id: &str, status: InstallmentStatus) -> ScheduleItem {
        let due = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        ScheduleItem {
            installment: CouponInstallment {
                id: id.to_string(),
                subscription_id: "sub-1".to_string(),
                due_date: due,
                gross_amount: dec!(130),
                net_amount: dec!(100),
                status,
                paid_date: None,
                paid_amount: None,
                investor_id: "inv-1".to_string(),
                investor_name: "Anne Collet".to_string(),
                investor_type: "individual".to_string(),
                investor_email: None,
                advisor_name: Some("Cabinet Roux".to_string()),
                project_id: "proj-1".to_string(),
                project_name: "Les Cèdres".to_string(),
                tranche_id: "t1".to_string(),
                tranche_name: "Tranche A".to_string(),
                has_bank_details: true,
                invested_amount: dec!(5000),
                is_final: false,
            },
            computed_status: match status {
                InstallmentStatus::Paid => ComputedStatus::Paye,
                InstallmentStatus::Pending => ComputedStatus::EnAttente,
            },
            days_remaining: 0,
        }
    }

    #[test]
    fn one_row_per_item_plus_header() {
        let items = vec![
            item("a", InstallmentStatus::Pending),
            item("b", InstallmentStatus::Paid),
        ];
        let bytes = schedule_csv(&items).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), items.len() + 1);
        assert!(lines[0].starts_with("project,tranche,investor"));
        assert!(lines[1].contains("en_attente"));
        assert!(lines[2].contains("paye"));
    }

    #[test]
    fn empty_optional_fields_render_as_empty_cells() {
        let mut it = item("a", InstallmentStatus::Pending);
        it.installment.advisor_name = None;
        let text = String::from_utf8(schedule_csv(&[it]).unwrap()).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",,") || row.ends_with(','));
    }
}
