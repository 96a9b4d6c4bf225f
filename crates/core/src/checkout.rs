//! Checkout orchestration rules: the two-phase step index, billing
//! address merging, contact validation, and order totals.

use rust_decimal::Decimal;

use crate::customize::SkuSchema;
use crate::error::CoreError;
use crate::money::DEFAULT_DELIVERY_CHARGE;
use crate::order::{Address, AssembledOrder, ContactInfo};

/// The linear checkout steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Step 0: per-SKU customization forms.
    Customize,
    /// Step 1: contact, addresses, and payment.
    Payment,
}

/// The first step for an order. The customization step is skipped entirely
/// when no product in the order carries a customizable SKU.
pub fn initial_step(order: &AssembledOrder) -> CheckoutStep {
    let customizable = order.products.iter().any(|line| {
        line.product
            .sku
            .as_deref()
            .map(|sku| SkuSchema::for_sku(sku).is_customizable())
            .unwrap_or(false)
    });
    if customizable {
        CheckoutStep::Customize
    } else {
        CheckoutStep::Payment
    }
}

/// Resolve the billing address for submission.
///
/// With `same_as_shipping` set, all five shipping fields are copied
/// verbatim. Otherwise a complete billing address is required (line 2 is
/// the only optional field).
pub fn resolve_billing(
    same_as_shipping: bool,
    shipping: &Address,
    billing: Option<&Address>,
) -> Result<Address, CoreError> {
    if same_as_shipping {
        return Ok(shipping.clone());
    }
    let billing = billing.ok_or_else(|| {
        CoreError::Validation("Billing address is required when not same as shipping".into())
    })?;
    validate_address("Billing", billing)?;
    Ok(billing.clone())
}

/// Check that the required fields of an address are present.
pub fn validate_address(label: &str, address: &Address) -> Result<(), CoreError> {
    let required = [
        ("address line 1", &address.address_line1),
        ("city", &address.city),
        ("state", &address.state),
        ("pincode", &address.pincode),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{label} {field} is required")));
        }
    }
    Ok(())
}

/// Check that the required contact fields are present.
pub fn validate_contact(contact: &ContactInfo) -> Result<(), CoreError> {
    let required = [
        ("phone number", &contact.phone_number),
        ("first name", &contact.first_name),
        ("last name", &contact.last_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("Contact {field} is required")));
        }
    }
    Ok(())
}

/// Grand total = cart total + flat delivery charge.
pub fn grand_total(cart_total: Decimal, delivery_charge: Decimal) -> Decimal {
    cart_total + delivery_charge
}

/// The configured-or-default delivery charge as a [`Decimal`].
pub fn delivery_charge(configured: Option<u32>) -> Decimal {
    Decimal::from(configured.unwrap_or(DEFAULT_DELIVERY_CHARGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderLine, PaymentStatus};
    use crate::product::{Product, ShipmentMetrics};

    fn shipping() -> Address {
        Address {
            address_line1: "12 MG Road".into(),
            address_line2: "Flat 4B".into(),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
        }
    }

    fn order_with_skus(skus: &[Option<&str>]) -> AssembledOrder {
        let products = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| OrderLine {
                product: Product {
                    id: format!("P{i}"),
                    name: format!("Product {i}"),
                    description: String::new(),
                    price: Decimal::from(100),
                    sku: sku.map(String::from),
                    colors: None,
                    shipment: ShipmentMetrics::default(),
                },
                quantity: 1,
                line_total: Decimal::from(100),
            })
            .collect();
        AssembledOrder {
            link_id: "abc123".into(),
            products,
            total_amount: Decimal::from(100),
            payment_status: PaymentStatus::Unpaid,
        }
    }

    #[test]
    fn customization_step_skipped_without_customizable_skus() {
        let order = order_with_skus(&[None, Some("PLAIN01")]);
        assert_eq!(initial_step(&order), CheckoutStep::Payment);
    }

    #[test]
    fn customization_step_present_with_customizable_sku() {
        let order = order_with_skus(&[None, Some("KCNP003")]);
        assert_eq!(initial_step(&order), CheckoutStep::Customize);
    }

    #[test]
    fn same_as_shipping_copies_all_five_fields_verbatim() {
        let resolved = resolve_billing(true, &shipping(), None).unwrap();
        assert_eq!(resolved, shipping());
    }

    #[test]
    fn toggling_same_as_shipping_reproduces_shipping_values() {
        // Off: a distinct billing address is used.
        let other = Address {
            address_line1: "9 Other St".into(),
            ..shipping()
        };
        let off = resolve_billing(false, &shipping(), Some(&other)).unwrap();
        assert_eq!(off, other);
        // Back on: the original shipping values come through verbatim.
        let on = resolve_billing(true, &shipping(), Some(&other)).unwrap();
        assert_eq!(on, shipping());
    }

    #[test]
    fn missing_billing_address_is_rejected() {
        assert!(resolve_billing(false, &shipping(), None).is_err());
    }

    #[test]
    fn incomplete_billing_address_is_rejected() {
        let incomplete = Address {
            pincode: "  ".into(),
            ..shipping()
        };
        assert!(resolve_billing(false, &shipping(), Some(&incomplete)).is_err());
    }

    #[test]
    fn billing_line_two_is_optional() {
        let no_line2 = Address {
            address_line2: String::new(),
            ..shipping()
        };
        assert!(resolve_billing(false, &shipping(), Some(&no_line2)).is_ok());
    }

    #[test]
    fn contact_requires_phone_and_names() {
        let contact = ContactInfo {
            phone_number: "9876543210".into(),
            email: None,
            first_name: "Asha".into(),
            last_name: "Rao".into(),
        };
        assert!(validate_contact(&contact).is_ok());

        let blank_phone = ContactInfo {
            phone_number: " ".into(),
            ..contact
        };
        assert!(validate_contact(&blank_phone).is_err());
    }

    #[test]
    fn grand_total_adds_flat_delivery_charge() {
        assert_eq!(
            grand_total(Decimal::from(200), delivery_charge(None)),
            Decimal::from(250)
        );
        assert_eq!(
            grand_total(Decimal::from(200), delivery_charge(Some(80))),
            Decimal::from(280)
        );
    }
}
