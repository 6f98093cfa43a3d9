//! Read-only ABI fragments of the deployed contracts.

use alloy_sol_types::sol;

sol! {
    interface IInsurancePool {
        function totalPolicies() external view returns (uint256);
        function totalPremiums() external view returns (uint256);
        function totalClaims() external view returns (uint256);
        function getPoolBalance() external view returns (uint256);
    }

    interface IPolicyNFT {
        function balanceOf(address owner) external view returns (uint256);
    }

    interface IReinsuranceToken {
        function totalSupply() external view returns (uint256);
    }

    interface IRiskOracle {
        function calculatePremium(
            uint256 age,
            string location,
            string insuranceType,
            uint256 coverage,
            uint256 duration,
            string occupation
        ) external view returns (uint256);

        function calculateRiskScore(
            uint256 age,
            string location,
            string occupation,
            string health
        ) external view returns (uint256);

        function getRiskFactors(
            uint256 age,
            string location,
            string occupation,
            string health
        ) external view returns (string[]);

        function getInsuranceRecommendations(
            uint256 age,
            string location,
            string occupation,
            string health
        ) external view returns (string[]);
    }
}
