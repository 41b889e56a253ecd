mod category;
mod item;
mod platform;
mod report;
mod user;

pub use category::Category;
pub use item::{
    parse_sort, CreateItem, EnrichedItem, Item, ItemListResponse, ItemStatus, SellItem, SortDir,
    SortKey, UpdateItem, STATUS_IN_STOCK, STATUS_SOLD,
};
pub use platform::{CreatePlatform, Platform};
pub use report::{
    AnnualReport, MonthlyProfitPoint, MonthlyReport, PlatformSales, PurchasedItem, SoldItem,
    StockValueRow, TopSoldItem, TotalReport,
};
pub use user::{AuthResponse, LoginRequest, RegisterUser, User};
