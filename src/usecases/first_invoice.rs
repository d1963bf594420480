use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::entities::enrollments::EnrollmentEntity;
use crate::domain::entities::invoices::InsertInvoiceEntity;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::services::proration::{BillingError, compute_charge};
use crate::domain::value_objects::billing::{DEFAULT_CURRENCY, FirstInvoiceDto};
use crate::domain::value_objects::enums::charge_modes::ChargeMode;
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;

#[derive(Debug, Error)]
pub enum FirstInvoiceError {
    #[error(transparent)]
    Billing(#[from] BillingError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, FirstInvoiceError>;

/// Issues the first invoice for a fresh enrollment: computes the charge for
/// the requested mode and submits the resulting invoice record through the
/// issuance seam. `reference_date` is passed in by the caller ("today"), so
/// the whole flow stays deterministic.
pub struct FirstInvoiceUseCase<Inv>
where
    Inv: InvoiceRepository + Send + Sync + 'static,
{
    invoice_repo: Arc<Inv>,
}

impl<Inv> FirstInvoiceUseCase<Inv>
where
    Inv: InvoiceRepository + Send + Sync + 'static,
{
    pub fn new(invoice_repo: Arc<Inv>) -> Self {
        Self { invoice_repo }
    }

    pub async fn generate_first_invoice(
        &self,
        enrollment: &EnrollmentEntity,
        mode: ChargeMode,
        reference_date: NaiveDate,
    ) -> UseCaseResult<FirstInvoiceDto> {
        info!(
            enrollment_id = %enrollment.id,
            mode = %mode,
            %reference_date,
            "first_invoice: generating first invoice"
        );

        let context = enrollment.billing_context(reference_date);
        let charge = compute_charge(&context, mode, &enrollment.discount).map_err(|err| {
            warn!(
                enrollment_id = %enrollment.id,
                error = %err,
                "first_invoice: billing inputs rejected"
            );
            err
        })?;

        let invoice = InsertInvoiceEntity {
            enrollment_id: enrollment.id,
            student_id: enrollment.student_id,
            plan_id: enrollment.plan_id,
            amount_minor: charge.final_amount_minor,
            discount_minor: charge.discount_applied_minor,
            currency: DEFAULT_CURRENCY.to_string(),
            period_start: reference_date,
            period_end: charge.due_date,
            due_at: charge.due_date,
            status: InvoiceStatus::Pending.to_string(),
        };

        let invoice_id = self
            .invoice_repo
            .create_invoice(invoice)
            .await
            .map_err(|err| {
                error!(
                    enrollment_id = %enrollment.id,
                    db_error = ?err,
                    "first_invoice: failed to create invoice"
                );
                FirstInvoiceError::Internal(err)
            })?;

        info!(
            enrollment_id = %enrollment.id,
            %invoice_id,
            due_date = %charge.due_date,
            final_amount_minor = charge.final_amount_minor,
            "first_invoice: invoice issued"
        );

        Ok(FirstInvoiceDto::from_charge(invoice_id, charge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use uuid::Uuid;

    use crate::domain::repositories::invoices::MockInvoiceRepository;
    use crate::domain::value_objects::discounts::DiscountSpec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_enrollment(discount: DiscountSpec) -> EnrollmentEntity {
        EnrollmentEntity {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            monthly_price_minor: 30000,
            due_day_of_month: 10,
            discount,
            started_at: date(2025, 11, 15),
        }
    }

    #[tokio::test]
    async fn issues_prorated_invoice_with_scaled_fixed_discount() {
        let enrollment = sample_enrollment(DiscountSpec::fixed(6000));
        let invoice_id = Uuid::new_v4();

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_create_invoice()
            .withf(move |invoice| {
                invoice.amount_minor == 20000
                    && invoice.discount_minor == 5000
                    && invoice.period_start == date(2025, 11, 15)
                    && invoice.period_end == date(2025, 12, 10)
                    && invoice.due_at == date(2025, 12, 10)
                    && invoice.status == "pending"
                    && invoice.currency == DEFAULT_CURRENCY
            })
            .returning(move |_| Box::pin(async move { Ok(invoice_id) }));

        let usecase = FirstInvoiceUseCase::new(Arc::new(invoice_repo));
        let dto = usecase
            .generate_first_invoice(&enrollment, ChargeMode::Prorated, date(2025, 11, 15))
            .await
            .unwrap();

        assert_eq!(dto.invoice_id, invoice_id);
        assert_eq!(dto.due_date, date(2025, 12, 10));
        assert_eq!(dto.days_until_due, 25);
        assert_eq!(dto.gross_amount_minor, 25000);
        assert_eq!(dto.discount_applied_minor, 5000);
        assert_eq!(dto.final_amount_minor, 20000);
    }

    #[tokio::test]
    async fn issues_full_invoice_with_percentage_discount() {
        let mut enrollment = sample_enrollment(DiscountSpec::percentage(10.0));
        enrollment.monthly_price_minor = 20000;

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_create_invoice()
            .withf(|invoice| invoice.amount_minor == 18000 && invoice.discount_minor == 2000)
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = FirstInvoiceUseCase::new(Arc::new(invoice_repo));
        let dto = usecase
            .generate_first_invoice(&enrollment, ChargeMode::Full, date(2025, 6, 1))
            .await
            .unwrap();

        assert_eq!(dto.gross_amount_minor, 20000);
        assert_eq!(dto.final_amount_minor, 18000);
    }

    #[tokio::test]
    async fn issues_undiscounted_invoice_when_discount_expired() {
        let enrollment =
            sample_enrollment(DiscountSpec::fixed(6000).with_valid_until(date(2025, 10, 31)));

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_create_invoice()
            .withf(|invoice| invoice.amount_minor == 25000 && invoice.discount_minor == 0)
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let usecase = FirstInvoiceUseCase::new(Arc::new(invoice_repo));
        let dto = usecase
            .generate_first_invoice(&enrollment, ChargeMode::Prorated, date(2025, 11, 15))
            .await
            .unwrap();

        assert_eq!(dto.discount_applied_minor, 0);
        assert_eq!(dto.final_amount_minor, 25000);
    }

    #[tokio::test]
    async fn rejects_invalid_billing_inputs_without_touching_repository() {
        let mut enrollment = sample_enrollment(DiscountSpec::none());
        enrollment.due_day_of_month = 29;

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo.expect_create_invoice().never();

        let usecase = FirstInvoiceUseCase::new(Arc::new(invoice_repo));
        let result = usecase
            .generate_first_invoice(&enrollment, ChargeMode::Full, date(2025, 11, 15))
            .await;

        assert!(matches!(
            result,
            Err(FirstInvoiceError::Billing(
                BillingError::InvalidConfiguration(_)
            ))
        ));
    }

    #[tokio::test]
    async fn propagates_repository_failure_as_internal_error() {
        let enrollment = sample_enrollment(DiscountSpec::none());

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_create_invoice()
            .returning(|_| Box::pin(async { Err(anyhow!("invoice store unavailable")) }));

        let usecase = FirstInvoiceUseCase::new(Arc::new(invoice_repo));
        let result = usecase
            .generate_first_invoice(&enrollment, ChargeMode::Full, date(2025, 11, 15))
            .await;

        assert!(matches!(result, Err(FirstInvoiceError::Internal(_))));
    }
}
