//! Display labels, kept in the back office's working language.

pub const COMPANIES_SCREEN: &str = "شركات المبيعات والتركيب";
pub const EMPLOYEES_SCREEN: &str = "موظفوا المبيعات والتركيب";
pub const BENEFICIARIES_SCREEN: &str = "المستفيدون الموقوفون";

pub const INSTALLATION_COMPANIES_TAB: &str = "شركات التركيب";
pub const SALES_COMPANIES_TAB: &str = "شركات المبيعات";
pub const INSTALLATION_EMPLOYEES_TAB: &str = "موظفوا شركات التركيب";
pub const SALES_EMPLOYEES_TAB: &str = "موظفوا شركات المبيعات";

pub const SEARCH_COMPANY_PLACEHOLDER: &str = "بحث عن شركة...";
pub const SEARCH_PLACEHOLDER: &str = "بحث...";

pub const COMPANY_NAME: &str = "اسم الشركة";
pub const COMMERCIAL_NUMBER: &str = "رقم السجل التجاري";
pub const UNIFIED_NUMBER: &str = "الرقم الموحد للمنشأة";

pub const EMPLOYEE_NAME: &str = "اسم الموظف";
pub const EMPLOYEE_NATIONAL_ID: &str = "رقم الهوية|الاقامة";
pub const JOB_NUMBER: &str = "رقم الوظيفة";
pub const NATIONAL_ID: &str = "رقم الهوية";
pub const NATIONALITY: &str = "الجنسية";
pub const PHONE: &str = "رقم الجوال";

pub const BENEFICIARY_NAME: &str = "اسم المستفيد";
pub const BENEFICIARY_NATIONAL_ID: &str = "رقم الهوية الوطنية";

pub const PROVIDER_NAME: &str = "اسم مقدم الخدمة";
pub const PROVIDER_CODE: &str = "الرمز";
pub const CONTRACTED_PROVIDERS: &str = "المتعاقدين مع مقدمي الخدمات";
pub const COMPANY_DATA: &str = "بيانات الشركة";
pub const COMPANY_EMPLOYEES: &str = "الموظفين";

pub const ADD_EMPLOYEE_TITLE: &str = "إضافة موظف الى قائمة الإيقاف";
pub const ADD_BENEFICIARY_TITLE: &str = "إضافة مستفيد الى قائمة الإيقاف";
pub const BENEFICIARY_DATA: &str = "بيانات المستفيد";
pub const PICK_COMPANY: &str = "اختر الشركة";
pub const PICK_EMPLOYEE: &str = "اختر الموظف";
pub const ENTER_NATIONAL_ID: &str = "أدخل رقم الهوية";
pub const BENEFICIARY_NOT_FOUND: &str = "لم يتم العثور على مستفيد بهذا الرقم.";

pub const PAGE_PREVIOUS: &str = "السابق";
pub const PAGE_NEXT: &str = "التالي";
