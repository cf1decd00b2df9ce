use alloy_sol_types::sol;

sol! {
    /// ERC20 metadata interface
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
    }

    /// Legacy tokens (MKR, SAI) returning bytes32 metadata
    interface IERC20Bytes32Metadata {
        function name() external view returns (bytes32);
        function symbol() external view returns (bytes32);
    }

    /// Shared by the v2 and v3 UI pool data providers
    interface IUiPoolDataProvider {
        function getReservesList(address provider) external view returns (address[] memory);
    }

    interface ILendingPoolAddressesProvider {
        function getLendingPool() external view returns (address);
    }

    interface IPoolAddressesProvider {
        function getPool() external view returns (address);
    }

    /// Aave v2 LendingPool
    interface ILendingPool {
        struct ReserveData {
            uint256 configuration;
            uint128 liquidityIndex;
            uint128 variableBorrowIndex;
            uint128 currentLiquidityRate;
            uint128 currentVariableBorrowRate;
            uint128 currentStableBorrowRate;
            uint40 lastUpdateTimestamp;
            address aTokenAddress;
            address stableDebtTokenAddress;
            address variableDebtTokenAddress;
            address interestRateStrategyAddress;
            uint8 id;
        }

        function getReserveData(address asset) external view returns (ReserveData memory);
    }

    /// Aave v3 Pool
    interface IPool {
        struct ReserveData {
            uint256 configuration;
            uint128 liquidityIndex;
            uint128 currentLiquidityRate;
            uint128 variableBorrowIndex;
            uint128 currentVariableBorrowRate;
            uint128 currentStableBorrowRate;
            uint40 lastUpdateTimestamp;
            uint16 id;
            address aTokenAddress;
            address stableDebtTokenAddress;
            address variableDebtTokenAddress;
            address interestRateStrategyAddress;
            uint128 accruedToTreasury;
            uint128 unbacked;
            uint128 isolationModeTotalDebt;
        }

        function getReserveData(address asset) external view returns (ReserveData memory);
    }
}
