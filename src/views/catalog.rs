use crate::domain::{Customer, InventoryItem, MenuItem};

/// Pseudo-category that shows the whole menu.
pub const ALL_CATEGORIES: &str = "all";

/// `all` followed by each distinct category in first-seen order.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut seen = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !seen.contains(&item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

pub fn filter_by_category<'a>(items: &'a [MenuItem], category: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| category == ALL_CATEGORIES || item.category == category)
        .collect()
}

pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|item| item.is_low_stock()).collect()
}

pub fn search_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|customer| customer.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u64, category: &str) -> MenuItem {
        MenuItem {
            id,
            name: format!("Dish {id}"),
            description: String::new(),
            price: 5.0,
            category: category.into(),
            image_url: String::new(),
            is_available: true,
        }
    }

    #[test]
    fn test_categories_first_seen() {
        let menu = vec![dish(1, "bowls"), dish(2, "drinks"), dish(3, "bowls")];
        assert_eq!(categories(&menu), vec!["all", "bowls", "drinks"]);
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_category_filter() {
        let menu = vec![dish(1, "bowls"), dish(2, "drinks"), dish(3, "bowls")];
        let ids = |items: Vec<&MenuItem>| items.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_by_category(&menu, "bowls")), vec![1, 3]);
        assert_eq!(ids(filter_by_category(&menu, ALL_CATEGORIES)), vec![1, 2, 3]);
        assert!(filter_by_category(&menu, "soups").is_empty());
    }

    #[test]
    fn test_low_stock_includes_threshold() {
        let item = |id, quantity| InventoryItem {
            id,
            name: "Kale".into(),
            unit: "kg".into(),
            quantity,
            low_stock_threshold: 2.0,
        };
        let items = vec![item(1, 1.0), item(2, 2.0), item(3, 2.5)];
        let low: Vec<_> = low_stock(&items).iter().map(|i| i.id).collect();
        assert_eq!(low, vec![1, 2]);
    }

    #[test]
    fn test_customer_search() {
        let customers = vec![
            Customer {
                id: 1,
                name: "Priya Shah".into(),
                mobile_no: "98200".into(),
                preferences: "No onions".into(),
                address: "Bandra".into(),
            },
            Customer {
                id: 2,
                name: "Tom".into(),
                mobile_no: "555".into(),
                preferences: String::new(),
                address: "Pune".into(),
            },
        ];
        assert_eq!(search_customers(&customers, "ONION").len(), 1);
        assert_eq!(search_customers(&customers, "pune")[0].id, 2);
        assert_eq!(search_customers(&customers, "  ").len(), 2);
    }
}
